//! Pie drawing: polygon-fan slices with a swatch legend.

use plotters::prelude::*;

use crate::{ChartError, ChartSeries, CHART_HEIGHT, CHART_WIDTH};

const PIE_CENTER: (i32, i32) = (168, 180);
const PIE_RADIUS: f64 = 128.0;
const FAN_STEPS: usize = 100;

const LEGEND_X: i32 = 318;
const LEGEND_Y0: i32 = 52;
const LEGEND_STEP: i32 = 24;
const LEGEND_SWATCH: i32 = 12;

pub(crate) fn draw(series: &ChartSeries, buf: &mut [u8]) -> Result<(), ChartError> {
    let root = BitMapBackend::with_buffer(buf, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(backend)?;

    // Slices start at 12 o'clock and sweep clockwise in input order; slice
    // value is the raw count, proportions are computed here against the
    // parsed total.
    let mut start = -90.0f64;
    for slice in &series.slices {
        let sweep = if series.total == 0 {
            0.0
        } else {
            slice.count as f64 / series.total as f64 * 360.0
        };
        draw_segment(&root, PIE_CENTER, PIE_RADIUS, start, sweep, to_color(slice))?;
        start += sweep;
    }

    let style = TextStyle::from(("sans-serif", 14).into_font());
    for (i, slice) in series.slices.iter().enumerate() {
        let y = LEGEND_Y0 + i as i32 * LEGEND_STEP;
        root.draw(&Rectangle::new(
            [(LEGEND_X, y), (LEGEND_X + LEGEND_SWATCH, y + LEGEND_SWATCH)],
            to_color(slice).filled(),
        ))
        .map_err(backend)?;
        let text = format!(
            "{} ({})",
            slice.axis_label,
            sd_core::format_percent_tenths(slice.pct_tenths)
        );
        root.draw_text(&text, &style, (LEGEND_X + LEGEND_SWATCH + 6, y))
            .map_err(backend)?;
    }

    root.present().map_err(backend)?;
    Ok(())
}

/// One filled slice as a polygon fan around the center.
fn draw_segment<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    center: (i32, i32),
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
    color: RGBColor,
) -> Result<(), ChartError> {
    let mut points = Vec::with_capacity(FAN_STEPS + 2);
    points.push(center);
    for i in 0..=FAN_STEPS {
        let angle = start_angle + sweep_angle * i as f64 / FAN_STEPS as f64;
        let rad = angle.to_radians();
        let x = center.0 + (radius * rad.cos()) as i32;
        let y = center.1 + (radius * rad.sin()) as i32;
        points.push((x, y));
    }
    root.draw(&Polygon::new(points, color.filled()))
        .map_err(backend)
}

fn to_color(slice: &crate::SeriesSlice) -> RGBColor {
    RGBColor(slice.color.r, slice.color.g, slice.color.b)
}

fn backend<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Backend(e.to_string())
}
