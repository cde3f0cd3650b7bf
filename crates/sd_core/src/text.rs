//! Display-label helpers.

/// Ellipsis used when a label is shortened for an axis tick.
pub const ELLIPSIS: char = '…';

/// Truncate `label` for a constrained display slot.
///
/// Labels of at most `max_chars` characters pass through unchanged; longer
/// ones keep `max_chars - 3` characters and gain a single `…`. Counted in
/// chars, so multi-byte input never splits inside a code point.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}{ELLIPSIS}")
}
