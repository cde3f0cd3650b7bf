//! Integer-first percentage helpers.
//!
//! Percent values are carried as **tenths of a percent** (583 ⇒ "58.3%") and
//! computed with integer arithmetic only, so repeated formatting never drifts.
//! For integer counts the per-entry rounding keeps the rendered sum within
//! ±0.5 of 100.

/// Percentage of `count` within `total`, in tenths of a percent, rounded
/// half-up. Returns 0 when `total` is 0.
pub fn percent_tenths(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let num = count as u128 * 1000;
    ((num + total as u128 / 2) / total as u128) as u64
}

/// Display form of a tenths value: 583 ⇒ "58.3%".
pub fn format_percent_tenths(tenths: u64) -> String {
    format!("{}.{}%", tenths / 10, tenths % 10)
}

/// Clamp a tenths value into the [5%, 100%] band used to size a visual
/// proxy (e.g. the small bar next to a percentage cell). Never applied to
/// numeric display.
pub fn visual_proxy_tenths(tenths: u64) -> u64 {
    tenths.clamp(50, 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_slice_split_matches_expected_display() {
        // 70 of 120 ≈ 58.3%, 50 of 120 ≈ 41.7%
        assert_eq!(percent_tenths(70, 120), 583);
        assert_eq!(percent_tenths(50, 120), 417);
        assert_eq!(format_percent_tenths(583), "58.3%");
        assert_eq!(format_percent_tenths(417), "41.7%");
    }

    #[test]
    fn rendered_sum_stays_within_half_percent() {
        let cases: &[&[u64]] = &[
            &[70, 50],
            &[1, 1, 1],
            &[3, 3, 3, 1],
            &[997, 2, 1],
            &[1, 2, 4, 8, 16, 32],
        ];
        for counts in cases {
            let total: u64 = counts.iter().sum();
            let sum: u64 = counts.iter().map(|&c| percent_tenths(c, total)).sum();
            let diff = sum.abs_diff(1000);
            assert!(diff <= 5, "counts {counts:?}: sum {sum} tenths");
        }
    }

    #[test]
    fn zero_total_yields_zero() {
        assert_eq!(percent_tenths(5, 0), 0);
        assert_eq!(percent_tenths(0, 0), 0);
    }

    #[test]
    fn proxy_clamps_only_the_proxy() {
        assert_eq!(visual_proxy_tenths(3), 50);
        assert_eq!(visual_proxy_tenths(583), 583);
        assert_eq!(visual_proxy_tenths(2000), 1000);
        // Numeric display is untouched by the clamp.
        assert_eq!(format_percent_tenths(3), "0.3%");
    }
}
