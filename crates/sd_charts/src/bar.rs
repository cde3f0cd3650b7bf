//! Bar drawing: one series, capped bar width, truncated category ticks.

use plotters::prelude::*;

use crate::{ChartError, ChartSeries, CHART_HEIGHT, CHART_WIDTH};

const MARGIN_L: i32 = 52;
const MARGIN_R: i32 = 16;
const MARGIN_T: i32 = 24;
const MARGIN_B: i32 = 56;

/// Bars never exceed this fraction of the plot width, however few there are.
const MAX_BAR_FRACTION: f64 = 0.18;
/// Fraction of a category slot a bar may fill.
const SLOT_FILL: f64 = 0.62;
const GRID_STEPS: u64 = 4;

const GRID: RGBColor = RGBColor(224, 224, 224);
const AXIS: RGBColor = RGBColor(96, 96, 96);

pub(crate) fn draw(series: &ChartSeries, buf: &mut [u8]) -> Result<(), ChartError> {
    let root = BitMapBackend::with_buffer(buf, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(backend)?;

    let plot_l = MARGIN_L;
    let plot_r = CHART_WIDTH as i32 - MARGIN_R;
    let plot_t = MARGIN_T;
    let plot_b = CHART_HEIGHT as i32 - MARGIN_B;
    let plot_w = (plot_r - plot_l) as f64;
    let plot_h = (plot_b - plot_t) as f64;

    let y_max = nice_ceiling(series.max_count());
    let tick_style = TextStyle::from(("sans-serif", 12).into_font());

    // Horizontal gridlines with y tick labels.
    for step in 0..=GRID_STEPS {
        let v = y_max * step / GRID_STEPS;
        let y = plot_b - (v as f64 / y_max as f64 * plot_h) as i32;
        root.draw(&PathElement::new(vec![(plot_l, y), (plot_r, y)], GRID))
            .map_err(backend)?;
        let label = v.to_string();
        let (tw, th) = root
            .estimate_text_size(&label, &tick_style)
            .unwrap_or((24, 12));
        root.draw_text(&label, &tick_style, (plot_l - tw as i32 - 6, y - th as i32 / 2))
            .map_err(backend)?;
    }

    // Bars, centered in their category slot.
    let n = series.slices.len();
    let slot = plot_w / n as f64;
    let bar_w = (slot * SLOT_FILL).min(plot_w * MAX_BAR_FRACTION);
    for (i, slice) in series.slices.iter().enumerate() {
        let cx = plot_l as f64 + slot * (i as f64 + 0.5);
        let h = (slice.count as f64 / y_max as f64 * plot_h) as i32;
        let color = RGBColor(slice.color.r, slice.color.g, slice.color.b);
        root.draw(&Rectangle::new(
            [
                ((cx - bar_w / 2.0) as i32, plot_b - h),
                ((cx + bar_w / 2.0) as i32, plot_b),
            ],
            color.filled(),
        ))
        .map_err(backend)?;

        // Count on top of the bar.
        let count = slice.count.to_string();
        let (tw, th) = root
            .estimate_text_size(&count, &tick_style)
            .unwrap_or((16, 12));
        root.draw_text(
            &count,
            &tick_style,
            (cx as i32 - tw as i32 / 2, plot_b - h - th as i32 - 2),
        )
        .map_err(backend)?;

        // Category tick below the baseline, already truncated by the series.
        let (tw, _) = root
            .estimate_text_size(&slice.axis_label, &tick_style)
            .unwrap_or((40, 12));
        root.draw_text(
            &slice.axis_label,
            &tick_style,
            (cx as i32 - tw as i32 / 2, plot_b + 8),
        )
        .map_err(backend)?;
    }

    // Baseline on top of the gridlines.
    root.draw(&PathElement::new(
        vec![(plot_l, plot_b), (plot_r, plot_b)],
        AXIS,
    ))
    .map_err(backend)?;

    root.present().map_err(backend)?;
    Ok(())
}

/// Round `max` up to 1/2/5 × 10^k for a stable y axis.
fn nice_ceiling(max: u64) -> u64 {
    if max == 0 {
        return 1;
    }
    let mut unit = 1u64;
    while unit * 10 <= max {
        unit *= 10;
    }
    for m in [1, 2, 5, 10] {
        if m * unit >= max {
            return m * unit;
        }
    }
    unreachable!("m = 10 always covers max")
}

fn backend<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::nice_ceiling;

    #[test]
    fn ceiling_snaps_to_1_2_5_decades() {
        assert_eq!(nice_ceiling(0), 1);
        assert_eq!(nice_ceiling(1), 1);
        assert_eq!(nice_ceiling(3), 5);
        assert_eq!(nice_ceiling(7), 10);
        assert_eq!(nice_ceiling(70), 100);
        assert_eq!(nice_ceiling(100), 100);
        assert_eq!(nice_ceiling(1200), 2000);
    }
}
