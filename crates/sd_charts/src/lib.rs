//! sd_charts — distribution chart rasterizer.
//!
//! Turns a list of `(label, count)` entries into a rendered PNG, pie or bar.
//! Pure in-memory: no filesystem, no network. Failure never crosses the
//! crate boundary as a panic; every error path returns `ChartError` so the
//! document composer can substitute its fallback block and keep going.
//!
//! Entries whose count does not parse as an integer are skipped for charting
//! with a logged warning; they are the caller's problem only insofar as an
//! adjoining table still shows them in full.

#![forbid(unsafe_code)]

use std::io::Cursor;

use thiserror::Error;

pub mod bar;
pub mod pie;
pub mod series;

pub use series::{ChartSeries, SeriesSlice, AXIS_LABEL_MAX_CHARS};

/// Raster dimensions, logical pixels. Fixed per invocation; the embedder
/// scales to its bounding box preserving this aspect ratio.
pub const CHART_WIDTH: u32 = 500;
pub const CHART_HEIGHT: u32 = 350;

/// Which chart to draw. One report never mixes the two.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChartKind {
    Pie,
    Bar,
}

/// Non-fatal, per-section failure: the caller substitutes a fallback block.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Every entry failed count parsing (or the input was empty).
    #[error("no chartable entries after count parsing")]
    EmptyDistribution,

    /// The drawing backend refused (e.g. no usable font for labels).
    #[error("chart drawing failed: {0}")]
    Backend(String),

    /// PNG encoding of the finished framebuffer failed.
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// A finished chart raster.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Render `entries` as `kind`. See the module docs for the skip/error rules.
pub fn render_distribution(
    kind: ChartKind,
    entries: &[sd_core::DistributionEntry],
) -> Result<RenderedChart, ChartError> {
    let series = ChartSeries::from_entries(kind, entries);
    if series.slices.is_empty() {
        return Err(ChartError::EmptyDistribution);
    }

    let mut buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    match kind {
        ChartKind::Pie => pie::draw(&series, &mut buf)?,
        ChartKind::Bar => bar::draw(&series, &mut buf)?,
    }

    let png = encode_png(buf)?;
    Ok(RenderedChart { png, width: CHART_WIDTH, height: CHART_HEIGHT })
}

/// Encode the RGB framebuffer as PNG.
fn encode_png(buf: Vec<u8>) -> Result<Vec<u8>, ChartError> {
    let img = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buf)
        .ok_or_else(|| ChartError::Encode("framebuffer size mismatch".into()))?;
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .map_err(|e| ChartError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}
