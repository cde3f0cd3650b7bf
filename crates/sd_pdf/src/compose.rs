//! Document composer: owns the PDF document, cursor, and buffer lifecycle.
//!
//! `begin` allocates a fresh document, `append` paints sections strictly in
//! the order given, `finish` consumes the composer and serializes exactly
//! once; ownership makes a double flush or a leaked open document
//! unrepresentable. Chart failures are absorbed here (fallback block); only
//! font registration and serialization failures abort the whole request.

use printpdf::image_crate;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, Rgb,
};
use tracing::warn;

use sd_charts::RenderedChart;
use sd_core::{ReportRequest, ReportVariant};

use crate::section::{sections_for, Section};
use crate::style;
use crate::table::{wrap_text, TableBlock, TableKind};
use crate::DocError;

/// Render `request` as `variant` and return the finished PDF bytes.
///
/// This is the whole public pipeline: build the section list, paint it,
/// serialize. Degraded charts still yield `Ok`; see the crate docs for the
/// failure taxonomy.
pub fn generate_report(
    request: &ReportRequest,
    variant: ReportVariant,
) -> Result<Vec<u8>, DocError> {
    let doc_title = request
        .title
        .as_deref()
        .unwrap_or_else(|| variant.default_title());

    let mut composer = DocumentComposer::begin(doc_title)?;
    for section in &sections_for(variant, request) {
        composer.append(section)?;
    }
    composer.finish()
}

pub struct DocumentComposer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    /// Cursor, millimetres from the page bottom. Content grows downward.
    y: f32,
}

impl DocumentComposer {
    /// Allocate a fresh A4 document with the built-in Helvetica pair.
    pub fn begin(doc_title: &str) -> Result<Self, DocError> {
        let (doc, page, layer) =
            PdfDocument::new(doc_title, Mm(style::PAGE_W), Mm(style::PAGE_H), "content");
        let layer = doc.get_page(page).get_layer(layer);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DocError::Font(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DocError::Font(e.to_string()))?;
        Ok(Self {
            doc,
            layer,
            font,
            font_bold,
            y: style::PAGE_H - style::MARGIN,
        })
    }

    /// Paint one section at the cursor. Sections are never reordered.
    pub fn append(&mut self, section: &Section) -> Result<(), DocError> {
        match section {
            Section::Title(t) => self.draw_title(t),
            Section::Meta { generated_at, period } => self.draw_meta(
                generated_at.as_deref(),
                period.as_ref().map(|(s, e)| (s.as_str(), e.as_str())),
            ),
            Section::KeyValueTable(t) => {
                self.draw_heading("Summary");
                self.draw_table(t);
            }
            Section::DetailTable(t) => {
                self.draw_heading("Detail Records");
                self.draw_table(t);
            }
            Section::DistributionTable(t) => {
                self.draw_heading("Distribution");
                self.draw_table(t);
            }
            Section::Chart { kind, entries } => {
                // The one place generation continues after an internal
                // failure: a failed chart degrades to a fallback block.
                match sd_charts::render_distribution(*kind, entries) {
                    Ok(chart) => {
                        if let Err(e) = self.draw_chart(&chart) {
                            warn!(error = %e, "chart embedding failed; substituting fallback block");
                            self.draw_chart_fallback();
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "chart rendering failed; substituting fallback block");
                        self.draw_chart_fallback();
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize and close the document. Consumes the composer; runs once.
    pub fn finish(self) -> Result<Vec<u8>, DocError> {
        let bytes = self
            .doc
            .save_to_bytes()
            .map_err(|e| DocError::Write(e.to_string()))?;
        if bytes.is_empty() {
            return Err(DocError::Write("serializer produced an empty buffer".into()));
        }
        Ok(bytes)
    }

    // -------------------- paging --------------------

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < style::MARGIN {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(style::PAGE_W), Mm(style::PAGE_H), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = style::PAGE_H - style::MARGIN;
    }

    // -------------------- scalar sections --------------------

    fn draw_title(&mut self, text: &str) {
        self.layer.set_fill_color(rgb(style::TEXT_PRI));
        self.y -= style::SIZE_TITLE * style::MM_PER_PT;
        self.layer.use_text(
            text,
            style::SIZE_TITLE,
            Mm(style::MARGIN),
            Mm(self.y),
            &self.font_bold,
        );
        self.y -= 3.0;
    }

    fn draw_meta(&mut self, generated_at: Option<&str>, period: Option<(&str, &str)>) {
        if let Some(ts) = generated_at {
            self.layer.set_fill_color(rgb(style::TEXT_MUT));
            self.y -= style::LINE_H;
            self.layer.use_text(
                format!("Generated: {ts}"),
                style::SIZE_SMALL,
                Mm(style::MARGIN),
                Mm(self.y),
                &self.font,
            );
        }
        if let Some((start, end)) = period {
            self.layer.set_fill_color(rgb(style::TEXT_PRI));
            self.y -= style::LINE_H;
            self.layer.use_text(
                format!("Reporting period: {start} to {end}"),
                style::SIZE_BODY,
                Mm(style::MARGIN),
                Mm(self.y),
                &self.font,
            );
        }
        self.y -= 3.0;
        hline(
            &self.layer,
            style::MARGIN,
            style::PAGE_W - style::MARGIN,
            self.y,
            style::BORDER,
            0.4,
        );
        self.y -= style::BLOCK_GAP;
    }

    fn draw_heading(&mut self, text: &str) {
        self.ensure_room(14.0);
        self.layer.set_fill_color(rgb(style::TEXT_PRI));
        self.y -= style::SIZE_SUBTITLE * style::MM_PER_PT;
        self.layer.use_text(
            text,
            style::SIZE_SUBTITLE,
            Mm(style::MARGIN),
            Mm(self.y),
            &self.font_bold,
        );
        self.y -= style::HEADING_GAP;
    }

    // -------------------- tables --------------------

    fn draw_table(&mut self, block: &TableBlock) {
        match block.kind {
            TableKind::Rows => self.draw_rows_table(block),
            TableKind::KeyValue => self.draw_key_value_table(block),
        }
    }

    fn draw_rows_table(&mut self, block: &TableBlock) {
        let header_h = style::LINE_H + 2.0 * style::CELL_PAD_Y;
        self.ensure_room(header_h + style::LINE_H + 2.0 * style::CELL_PAD_Y);
        self.draw_header_row(block, header_h);

        for (i, row) in block.rows.iter().enumerate() {
            let (cells, row_h) = row_layout(block, row);
            if self.y - row_h < style::MARGIN {
                self.new_page();
                self.draw_header_row(block, header_h);
            }
            let top = self.y;
            if TableBlock::is_striped(i) {
                fill_rect(
                    &self.layer,
                    style::MARGIN,
                    top - row_h,
                    style::CONTENT_W,
                    row_h,
                    style::ROW_ALT_BG,
                );
            }
            let mut x = style::MARGIN;
            for (ci, lines) in cells.iter().enumerate() {
                let w = block.col_widths[ci];
                self.layer.set_fill_color(rgb(style::TEXT_PRI));
                for (li, line) in lines.iter().enumerate() {
                    let baseline = top - style::CELL_PAD_Y - style::LINE_H * (li as f32 + 1.0) + 1.2;
                    self.layer.use_text(
                        line.clone(),
                        style::SIZE_BODY,
                        Mm(x + style::CELL_PAD_X),
                        Mm(baseline),
                        &self.font,
                    );
                }
                stroke_rect(&self.layer, x, top - row_h, w, row_h, style::BORDER, 0.2);
                x += w;
            }
            if let Some(Some(tenths)) = block.proxies.get(i) {
                self.draw_proxy(block, top, row_h, *tenths);
            }
            self.y -= row_h;
        }
        self.y -= style::BLOCK_GAP;
    }

    /// Centered, header-styled column row. Repeated after a page break.
    fn draw_header_row(&mut self, block: &TableBlock, header_h: f32) {
        let top = self.y;
        fill_rect(
            &self.layer,
            style::MARGIN,
            top - header_h,
            style::CONTENT_W,
            header_h,
            style::HEADER_BG,
        );
        self.layer.set_fill_color(rgb(style::HEADER_FG));
        let mut x = style::MARGIN;
        for (ci, name) in block.columns.iter().enumerate() {
            let w = block.col_widths[ci];
            let shown = sd_core::truncate_label(name, style::chars_per_width(w));
            let tx = x + ((w - style::text_width_mm(&shown, style::SIZE_BODY)) / 2.0).max(0.0);
            self.layer.use_text(
                shown,
                style::SIZE_BODY,
                Mm(tx),
                Mm(top - header_h + style::CELL_PAD_Y + 1.2),
                &self.font_bold,
            );
            x += w;
        }
        self.y -= header_h;
    }

    /// Key/value table: label cells carry the header style (left-aligned),
    /// value cells stripe independently starting unstriped.
    fn draw_key_value_table(&mut self, block: &TableBlock) {
        for (i, row) in block.rows.iter().enumerate() {
            let (cells, row_h) = row_layout(block, row);
            self.ensure_room(row_h);
            let top = self.y;
            let label_w = block.col_widths[0];
            let value_w = block.col_widths[1];

            fill_rect(
                &self.layer,
                style::MARGIN,
                top - row_h,
                label_w,
                row_h,
                style::HEADER_BG,
            );
            if TableBlock::is_striped(i) {
                fill_rect(
                    &self.layer,
                    style::MARGIN + label_w,
                    top - row_h,
                    value_w,
                    row_h,
                    style::ROW_ALT_BG,
                );
            }

            self.layer.set_fill_color(rgb(style::HEADER_FG));
            for (li, line) in cells[0].iter().enumerate() {
                let baseline = top - style::CELL_PAD_Y - style::LINE_H * (li as f32 + 1.0) + 1.2;
                self.layer.use_text(
                    line.clone(),
                    style::SIZE_BODY,
                    Mm(style::MARGIN + style::CELL_PAD_X),
                    Mm(baseline),
                    &self.font_bold,
                );
            }
            self.layer.set_fill_color(rgb(style::TEXT_PRI));
            for (li, line) in cells[1].iter().enumerate() {
                let baseline = top - style::CELL_PAD_Y - style::LINE_H * (li as f32 + 1.0) + 1.2;
                self.layer.use_text(
                    line.clone(),
                    style::SIZE_BODY,
                    Mm(style::MARGIN + label_w + style::CELL_PAD_X),
                    Mm(baseline),
                    &self.font,
                );
            }

            stroke_rect(&self.layer, style::MARGIN, top - row_h, label_w, row_h, style::BORDER, 0.2);
            stroke_rect(
                &self.layer,
                style::MARGIN + label_w,
                top - row_h,
                value_w,
                row_h,
                style::BORDER,
                0.2,
            );
            self.y -= row_h;
        }
        self.y -= style::BLOCK_GAP;
    }

    /// Small bar next to the share text, sized by the clamped percentage.
    fn draw_proxy(&self, block: &TableBlock, top: f32, row_h: f32, tenths: u64) {
        const SHARE_TEXT_W: f32 = 16.0;
        let k = block.col_widths.len();
        let x_last: f32 = style::MARGIN + block.col_widths[..k - 1].iter().sum::<f32>();
        let w_last = block.col_widths[k - 1];
        let x = x_last + style::CELL_PAD_X + SHARE_TEXT_W;
        let w = w_last - 2.0 * style::CELL_PAD_X - SHARE_TEXT_W;
        if w <= 2.0 {
            return;
        }
        let y = top - row_h / 2.0 - 1.1;
        fill_rect(&self.layer, x, y, w, 2.2, style::PROXY_TRACK);
        fill_rect(
            &self.layer,
            x,
            y,
            w * (tenths as f32 / 1000.0),
            2.2,
            style::PROXY_FILL,
        );
    }

    // -------------------- chart embedding --------------------

    fn draw_chart(&mut self, chart: &RenderedChart) -> Result<(), DocError> {
        self.ensure_room(style::CHART_BOX_H + style::BLOCK_GAP);
        let decoded =
            image_crate::load_from_memory_with_format(&chart.png, image_crate::ImageFormat::Png)
                .map_err(|e| DocError::Image(e.to_string()))?;
        let image = Image::from_dynamic_image(&decoded);

        // Fit the bounding box width; dpi scaling preserves the aspect
        // ratio, horizontal centering comes from the translate.
        let target_w = style::CHART_BOX_W;
        let dpi = chart.width as f32 * 25.4 / target_w;
        let target_h = chart.height as f32 * 25.4 / dpi;
        let x = style::MARGIN + (style::CONTENT_W - target_w) / 2.0;
        let y = self.y - target_h;
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        self.y -= target_h + style::BLOCK_GAP;
        Ok(())
    }

    /// Textual stand-in occupying the chart's position.
    fn draw_chart_fallback(&mut self) {
        const BOX_H: f32 = 18.0;
        self.ensure_room(BOX_H + style::BLOCK_GAP);
        let top = self.y;
        stroke_rect(
            &self.layer,
            style::MARGIN,
            top - BOX_H,
            style::CONTENT_W,
            BOX_H,
            style::BORDER,
            0.3,
        );

        let headline = "Chart unavailable";
        self.layer.set_fill_color(rgb(style::TEXT_PRI));
        let tx = style::MARGIN
            + ((style::CONTENT_W - style::text_width_mm(headline, style::SIZE_BODY)) / 2.0).max(0.0);
        self.layer
            .use_text(headline, style::SIZE_BODY, Mm(tx), Mm(top - 8.0), &self.font_bold);

        let note = "The distribution chart could not be rendered; tabular data continues below.";
        self.layer.set_fill_color(rgb(style::TEXT_MUT));
        let nx = style::MARGIN
            + ((style::CONTENT_W - style::text_width_mm(note, style::SIZE_SMALL)) / 2.0).max(0.0);
        self.layer
            .use_text(note, style::SIZE_SMALL, Mm(nx), Mm(top - 14.0), &self.font);

        self.y -= BOX_H + style::BLOCK_GAP;
    }
}

// -------------------- free helpers --------------------

/// Wrapped lines per cell and the resulting row height.
fn row_layout(block: &TableBlock, row: &[String]) -> (Vec<Vec<String>>, f32) {
    let cells: Vec<Vec<String>> = row
        .iter()
        .zip(&block.col_widths)
        .map(|(cell, w)| wrap_text(cell, style::chars_per_width(*w)))
        .collect();
    let lines = cells.iter().map(|c| c.len()).max().unwrap_or(1);
    let h = lines as f32 * style::LINE_H + 2.0 * style::CELL_PAD_Y;
    (cells, h)
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y + h)), false),
        (Point::new(Mm(x), Mm(y + h)), false),
    ]
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, color: (f32, f32, f32)) {
    layer.set_fill_color(rgb(color));
    layer.add_polygon(Polygon {
        rings: vec![rect_points(x, y, w, h)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn stroke_rect(
    layer: &PdfLayerReference,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: (f32, f32, f32),
    thickness: f32,
) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(thickness);
    layer.add_polygon(Polygon {
        rings: vec![rect_points(x, y, w, h)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
}

fn hline(layer: &PdfLayerReference, x0: f32, x1: f32, y: f32, color: (f32, f32, f32), thickness: f32) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x0), Mm(y)), false),
            (Point::new(Mm(x1), Mm(y)), false),
        ],
        is_closed: false,
    });
}
