//! Report request model and the detail-row column contract.
//!
//! A `ReportRequest` arrives fully validated from the caller (HTTP layer,
//! CLI, tests) and is immutable for the duration of one generation call.
//! All values are display strings by the time they reach this crate; the
//! wire boundary (`sd_cli`) stringifies scalars and maps null to "".
//!
//! Detail rows are ordered `(column, value)` pairs rather than unordered
//! maps: the first row fixes the column set and order, and `DetailTable`
//! normalizes every later row against that contract.

use core::str::FromStr;

use crate::errors::CoreError;

// -------------------- variants --------------------

/// The two fixed section-ordering pipelines.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ReportVariant {
    /// Summary + detail table + species pie chart + distribution table.
    General,
    /// Summary + bar chart + reasons table.
    Rejections,
}

impl ReportVariant {
    /// Title used when the request carries none.
    pub fn default_title(&self) -> &'static str {
        match self {
            ReportVariant::General => "Statistics Report",
            ReportVariant::Rejections => "Rejection Reasons Report",
        }
    }
}

impl FromStr for ReportVariant {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(ReportVariant::General),
            "rejections" => Ok(ReportVariant::Rejections),
            _ => Err(CoreError::UnknownVariant),
        }
    }
}

// -------------------- entries --------------------

/// One labeled count feeding a chart and its companion table.
///
/// `count` stays textual here; whether it parses decides chart membership
/// (parse failure excludes the entry from the chart, never from a table).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionEntry {
    pub label: String,
    pub count: String,
}

impl DistributionEntry {
    pub fn new(label: impl Into<String>, count: impl Into<String>) -> Self {
        Self { label: label.into(), count: count.into() }
    }

    /// The count as a non-negative integer, if it parses as one.
    pub fn parsed_count(&self) -> Option<u64> {
        self.count.trim().parse().ok()
    }
}

/// One detail row: ordered `(column, value)` pairs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DetailRow {
    cells: Vec<(String, String)>,
}

impl DetailRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell, preserving insertion order.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<C: Into<String>, V: Into<String>> FromIterator<(C, V)> for DetailRow {
    fn from_iter<T: IntoIterator<Item = (C, V)>>(iter: T) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(c, v)| (c.into(), v.into()))
                .collect(),
        }
    }
}

// -------------------- the request --------------------

/// Everything one report generation needs, already validated upstream.
#[derive(Clone, Debug, Default)]
pub struct ReportRequest {
    pub title: Option<String>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    /// Stamped by the caller (the CLI uses wall-clock UTC); the generator
    /// itself never reads ambient time.
    pub generated_at: Option<String>,
    /// Rendered in insertion order.
    pub summary: Vec<(String, String)>,
    pub detail_rows: Vec<DetailRow>,
    pub distribution: Vec<DistributionEntry>,
}

impl ReportRequest {
    /// Period line content, present only when both ends are set.
    pub fn period(&self) -> Option<(&str, &str)> {
        match (&self.period_start, &self.period_end) {
            (Some(s), Some(e)) => Some((s.as_str(), e.as_str())),
            _ => None,
        }
    }
}

// -------------------- detail-table normalization --------------------

/// A detail table with the column contract enforced.
///
/// Columns are the FIRST row's keys in insertion order (first occurrence
/// wins on duplicates). Every body row has exactly `columns.len()` cells:
/// missing keys become empty cells, keys outside the contract are dropped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetailTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DetailTable {
    /// Normalize `rows` against the first row's columns.
    ///
    /// Returns `None` when there is nothing to render (no rows, or a first
    /// row with no keys); the caller skips the section rather than drawing
    /// an empty table.
    pub fn from_rows(rows: &[DetailRow]) -> Option<Self> {
        let first = rows.first()?;
        let mut columns: Vec<String> = Vec::new();
        for c in first.columns() {
            if !columns.iter().any(|k| k == c) {
                columns.push(c.to_string());
            }
        }
        if columns.is_empty() {
            return None;
        }

        let body = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| row.get(col).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();

        Some(Self { columns, rows: body })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
