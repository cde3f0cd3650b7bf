//! Page geometry and style constants (A4 portrait, millimetres).
//!
//! Process-wide immutable configuration: renderers read these by reference
//! and never mutate them, so concurrent generation needs no synchronization.

pub const PAGE_W: f32 = 210.0;
pub const PAGE_H: f32 = 297.0;
pub const MARGIN: f32 = 18.0;
pub const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;

// Table palette: solid header, light striping, hairline borders.
pub const HEADER_BG: (f32, f32, f32) = (0.00, 0.59, 0.39);
pub const HEADER_FG: (f32, f32, f32) = (1.00, 1.00, 1.00);
pub const ROW_ALT_BG: (f32, f32, f32) = (0.96, 0.96, 0.96);
pub const BORDER: (f32, f32, f32) = (0.86, 0.86, 0.86);
pub const TEXT_PRI: (f32, f32, f32) = (0.10, 0.10, 0.12);
pub const TEXT_MUT: (f32, f32, f32) = (0.45, 0.47, 0.50);

// Visual proxy bar next to percentage cells.
pub const PROXY_TRACK: (f32, f32, f32) = (0.92, 0.93, 0.94);
pub const PROXY_FILL: (f32, f32, f32) = (0.00, 0.59, 0.39);

// Font sizes, points (Helvetica built-ins).
pub const SIZE_TITLE: f32 = 18.0;
pub const SIZE_SUBTITLE: f32 = 13.0;
pub const SIZE_BODY: f32 = 10.0;
pub const SIZE_SMALL: f32 = 8.5;

// Layout rhythm, millimetres.
pub const LINE_H: f32 = 4.6;
pub const CELL_PAD_X: f32 = 2.4;
pub const CELL_PAD_Y: f32 = 1.8;
pub const BLOCK_GAP: f32 = 7.0;
pub const HEADING_GAP: f32 = 4.0;

// Bounding box for the embedded chart raster (500×350 source, aspect kept).
pub const CHART_BOX_W: f32 = 140.0;
pub const CHART_BOX_H: f32 = 98.0;

/// Millimetres per point.
pub const MM_PER_PT: f32 = 0.352_778;

/// Rough average glyph advance for Helvetica, em fraction.
const AVG_GLYPH_EM: f32 = 0.5;

/// Estimated width of `text` at `size_pt`, for centering and wrapping.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_GLYPH_EM * MM_PER_PT
}

/// Character budget for a cell `width_mm` wide at body size.
pub fn chars_per_width(width_mm: f32) -> usize {
    let usable = (width_mm - 2.0 * CELL_PAD_X).max(1.0);
    let per_char = SIZE_BODY * AVG_GLYPH_EM * MM_PER_PT;
    ((usable / per_char) as usize).max(4)
}
