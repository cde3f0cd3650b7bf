//! Chart series assembly: count parsing, filtering, and color assignment.
//!
//! This is the pure half of the renderer: everything a test needs to check
//! without rasterizing anything.

use sd_core::{color_at, percent_tenths, truncate_label, DistributionEntry, PaletteCycle, Rgb};
use tracing::warn;

use crate::ChartKind;

/// Category axis ticks longer than this are shortened (cosmetic only; tables
/// always carry the full label).
pub const AXIS_LABEL_MAX_CHARS: usize = 30;

/// One chartable entry after parsing and color assignment.
#[derive(Clone, Debug)]
pub struct SeriesSlice {
    /// Full label, as supplied.
    pub label: String,
    /// Tick form of the label (truncated for bar axes).
    pub axis_label: String,
    pub count: u64,
    /// Share of the parsed total, tenths of a percent.
    pub pct_tenths: u64,
    pub color: Rgb,
}

/// The filtered, ordered series a chart draws from.
#[derive(Clone, Debug)]
pub struct ChartSeries {
    pub slices: Vec<SeriesSlice>,
    /// Sum of parsed counts; proportions are computed against this.
    pub total: u64,
}

impl ChartSeries {
    /// Parse and filter `entries`, keeping input order.
    ///
    /// Color assignment is deterministic but kind-specific: pie keys the
    /// palette cycle by first-seen label, bar assigns by index within the
    /// filtered list. The two kinds never appear in one report, so the
    /// divergence is intentional and unreconciled.
    pub fn from_entries(kind: ChartKind, entries: &[DistributionEntry]) -> Self {
        let mut parsed: Vec<(String, u64)> = Vec::with_capacity(entries.len());
        for e in entries {
            match e.parsed_count() {
                Some(c) => parsed.push((e.label.clone(), c)),
                None => warn!(
                    label = %e.label,
                    count = %e.count,
                    "distribution count did not parse; entry skipped for charting"
                ),
            }
        }

        let total: u64 = parsed.iter().map(|(_, c)| c).sum();
        let mut cycle = PaletteCycle::new();
        let slices = parsed
            .into_iter()
            .enumerate()
            .map(|(i, (label, count))| {
                let color = match kind {
                    ChartKind::Pie => cycle.color_for(&label),
                    ChartKind::Bar => color_at(i),
                };
                SeriesSlice {
                    axis_label: truncate_label(&label, AXIS_LABEL_MAX_CHARS),
                    pct_tenths: percent_tenths(count, total),
                    label,
                    count,
                    color,
                }
            })
            .collect();

        Self { slices, total }
    }

    pub fn max_count(&self) -> u64 {
        self.slices.iter().map(|s| s.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::PALETTE;

    fn entries(pairs: &[(&str, &str)]) -> Vec<DistributionEntry> {
        pairs
            .iter()
            .map(|&(l, c)| DistributionEntry::new(l, c))
            .collect()
    }

    #[test]
    fn unparseable_counts_are_skipped_for_charting() {
        let input = entries(&[("Dog", "70"), ("Cat", "fifty"), ("Bird", "30")]);
        let series = ChartSeries::from_entries(ChartKind::Pie, &input);
        let labels: Vec<&str> = series.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Dog", "Bird"]);
        assert_eq!(series.total, 100);
    }

    #[test]
    fn pie_colors_key_by_first_seen_label() {
        let input = entries(&[("Dog", "1"), ("Cat", "2"), ("Dog", "3")]);
        let series = ChartSeries::from_entries(ChartKind::Pie, &input);
        assert_eq!(series.slices[0].color, PALETTE[0]);
        assert_eq!(series.slices[1].color, PALETTE[1]);
        // Repeated label keeps its first slot.
        assert_eq!(series.slices[2].color, PALETTE[0]);
    }

    #[test]
    fn bar_colors_assign_by_filtered_index() {
        let input = entries(&[("Dog", "1"), ("Cat", "oops"), ("Dog", "3")]);
        let series = ChartSeries::from_entries(ChartKind::Bar, &input);
        // "Cat" dropped out; the second surviving bar takes palette slot 1
        // even though its label repeats slot 0's.
        assert_eq!(series.slices[0].color, PALETTE[0]);
        assert_eq!(series.slices[1].color, PALETTE[1]);
    }

    #[test]
    fn axis_labels_truncate_but_full_labels_survive() {
        let long = "x".repeat(35);
        let input = entries(&[(long.as_str(), "10")]);
        let series = ChartSeries::from_entries(ChartKind::Bar, &input);
        let slice = &series.slices[0];
        assert_eq!(slice.label, long);
        assert_eq!(slice.axis_label.chars().count(), 28);
        assert!(slice.axis_label.ends_with('…'));
    }

    #[test]
    fn percentages_come_from_raw_counts() {
        let input = entries(&[("Dog", "70"), ("Cat", "50")]);
        let series = ChartSeries::from_entries(ChartKind::Pie, &input);
        assert_eq!(series.slices[0].pct_tenths, 583);
        assert_eq!(series.slices[1].pct_tenths, 417);
    }
}
