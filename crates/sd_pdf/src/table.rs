//! Table layout model.
//!
//! Pure data: a `TableBlock` can be built and inspected without any PDF
//! backend, which is where the column-contract and striping tests live.
//! The composer paints blocks; it never re-derives layout.

use sd_core::{
    format_percent_tenths, percent_tenths, visual_proxy_tenths, DetailTable, DistributionEntry,
};

use crate::style;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableKind {
    /// Two columns; the label cells carry the header style, left-aligned.
    KeyValue,
    /// First-row-keyed columns with a separate, centered header row.
    Rows,
}

/// A fully laid-out table: every body row has exactly `col_count()` cells.
#[derive(Clone, Debug)]
pub struct TableBlock {
    pub kind: TableKind,
    /// Header row labels; empty for key/value tables.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column widths in millimetres; sums to the content width.
    pub col_widths: Vec<f32>,
    /// Clamped proxy size (tenths) per row for the trailing percentage
    /// column; empty unless this is a distribution table. `None` marks a
    /// row whose count did not parse.
    pub proxies: Vec<Option<u64>>,
}

impl TableBlock {
    /// Two-column label/value table. `wide_value` widens the value column
    /// (used by the rejections variant). Empty input renders nothing.
    pub fn key_value(entries: &[(String, String)], wide_value: bool) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let label_frac = if wide_value { 0.35 } else { 0.50 };
        let rows = entries
            .iter()
            .map(|(k, v)| vec![k.clone(), v.clone()])
            .collect();
        Some(Self {
            kind: TableKind::KeyValue,
            columns: Vec::new(),
            rows,
            col_widths: vec![
                style::CONTENT_W * label_frac,
                style::CONTENT_W * (1.0 - label_frac),
            ],
            proxies: Vec::new(),
        })
    }

    /// Detail table over a normalized column contract; equal column split.
    pub fn rows(table: &DetailTable) -> Self {
        let k = table.columns().len();
        let w = style::CONTENT_W / k as f32;
        Self {
            kind: TableKind::Rows,
            columns: table.columns().to_vec(),
            rows: table.rows().to_vec(),
            col_widths: vec![w; k],
            proxies: Vec::new(),
        }
    }

    /// Companion table for a distribution: label / count / share.
    ///
    /// Labels always render in full here, whatever the chart did to its
    /// axis ticks. Rows whose count fails to parse keep their raw count
    /// text and get a blank share cell (they were only excluded from the
    /// chart, not from the table).
    pub fn distribution(label_header: &str, entries: &[DistributionEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let total: u64 = entries.iter().filter_map(|e| e.parsed_count()).sum();
        let mut rows = Vec::with_capacity(entries.len());
        let mut proxies = Vec::with_capacity(entries.len());
        for e in entries {
            match e.parsed_count() {
                Some(c) => {
                    let tenths = percent_tenths(c, total);
                    rows.push(vec![
                        e.label.clone(),
                        c.to_string(),
                        format_percent_tenths(tenths),
                    ]);
                    proxies.push(Some(visual_proxy_tenths(tenths)));
                }
                None => {
                    rows.push(vec![e.label.clone(), e.count.clone(), String::new()]);
                    proxies.push(None);
                }
            }
        }
        Some(Self {
            kind: TableKind::Rows,
            columns: vec![
                label_header.to_string(),
                "Count".to_string(),
                "Share".to_string(),
            ],
            rows,
            col_widths: vec![
                style::CONTENT_W * 0.50,
                style::CONTENT_W * 0.18,
                style::CONTENT_W * 0.32,
            ],
            proxies,
        })
    }

    pub fn col_count(&self) -> usize {
        self.col_widths.len()
    }

    /// Row 0 base, row 1 striped, flipping every row. Parity is local to
    /// each table regardless of what rendered before it.
    pub fn is_striped(row: usize) -> bool {
        row % 2 == 1
    }
}

/// Word-aware wrap into lines of at most `max_chars` characters; oversized
/// words hard-split. Always returns at least one (possibly empty) line.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max {
            if cur_len > 0 {
                lines.push(std::mem::take(&mut cur));
                cur_len = 0;
            }
            lines.push(chars.drain(..max).collect());
        }
        let wlen = chars.len();
        if wlen == 0 {
            continue;
        }
        let needed = if cur_len == 0 { wlen } else { cur_len + 1 + wlen };
        if needed <= max {
            if cur_len > 0 {
                cur.push(' ');
            }
            cur.extend(chars);
            cur_len = needed;
        } else {
            lines.push(std::mem::take(&mut cur));
            cur = chars.into_iter().collect();
            cur_len = wlen;
        }
    }
    if cur_len > 0 || lines.is_empty() {
        lines.push(cur);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::DetailRow;

    fn kv(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn key_value_is_always_two_columns() {
        let t = TableBlock::key_value(&kv(&[("Total", "120"), ("Active", "95")]), false).unwrap();
        assert_eq!(t.col_count(), 2);
        assert_eq!(t.rows.len(), 2);
        assert!(t.columns.is_empty());
        assert!((t.col_widths[0] - t.col_widths[1]).abs() < 0.01);
    }

    #[test]
    fn wide_value_variant_widens_the_value_column() {
        let t = TableBlock::key_value(&kv(&[("Total", "3")]), true).unwrap();
        assert!(t.col_widths[1] > t.col_widths[0]);
        assert!((t.col_widths[0] + t.col_widths[1] - style::CONTENT_W).abs() < 0.01);
    }

    #[test]
    fn empty_key_value_is_skipped() {
        assert!(TableBlock::key_value(&[], false).is_none());
    }

    #[test]
    fn striping_parity_is_row_local() {
        assert!(!TableBlock::is_striped(0));
        assert!(TableBlock::is_striped(1));
        assert!(!TableBlock::is_striped(2));
        assert!(TableBlock::is_striped(3));
    }

    #[test]
    fn detail_table_column_count_follows_first_row() {
        let rows = [
            [("Name", "Luna"), ("Status", "Adopted")]
                .into_iter()
                .collect::<DetailRow>(),
            [("Name", "Rex"), ("Status", "Pending")]
                .into_iter()
                .collect::<DetailRow>(),
        ];
        let detail = DetailTable::from_rows(&rows).unwrap();
        let t = TableBlock::rows(&detail);
        assert_eq!(t.col_count(), 2);
        assert_eq!(t.columns, ["Name", "Status"]);
        for row in &t.rows {
            assert_eq!(row.len(), 2);
        }
    }

    #[test]
    fn distribution_keeps_unparsed_rows_with_blank_share() {
        let entries = vec![
            DistributionEntry::new("Dog", "70"),
            DistributionEntry::new("Cat", "fifty"),
            DistributionEntry::new("Bird", "30"),
        ];
        let t = TableBlock::distribution("Species", &entries).unwrap();
        assert_eq!(t.rows.len(), 3);
        // Parsed against total 100 (only Dog + Bird).
        assert_eq!(t.rows[0], ["Dog", "70", "70.0%"]);
        assert_eq!(t.rows[1], ["Cat", "fifty", ""]);
        assert_eq!(t.rows[2], ["Bird", "30", "30.0%"]);
        assert_eq!(t.proxies[1], None);
        assert_eq!(t.proxies[0], Some(700));
    }

    #[test]
    fn distribution_table_never_truncates_labels() {
        let long = "x".repeat(35);
        let entries = vec![DistributionEntry::new(long.clone(), "10")];
        let t = TableBlock::distribution("Reason", &entries).unwrap();
        assert_eq!(t.rows[0][0], long);
    }

    #[test]
    fn distribution_proxy_is_clamped_share_is_not() {
        let entries = vec![
            DistributionEntry::new("A", "1"),
            DistributionEntry::new("B", "99"),
        ];
        let t = TableBlock::distribution("Label", &entries).unwrap();
        assert_eq!(t.rows[0][2], "1.0%");
        assert_eq!(t.proxies[0], Some(50)); // floor of the proxy band
        assert_eq!(t.proxies[1], Some(990));
    }

    #[test]
    fn wrap_splits_on_words_and_hard_splits_monsters() {
        assert_eq!(wrap_text("a b c", 10), ["a b c"]);
        assert_eq!(wrap_text("alpha beta gamma", 11), ["alpha beta", "gamma"]);
        assert_eq!(wrap_text("abcdefgh", 3), ["abc", "def", "gh"]);
        assert_eq!(wrap_text("", 8), [""]);
    }
}
