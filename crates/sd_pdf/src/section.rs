//! Section model and per-variant assembly.
//!
//! A report variant is a declarative section list, not a subclass: each
//! variant's builder returns `Vec<Section>` and the composer walks it in
//! order. Optional blocks appear iff their own backing data is non-empty;
//! the absence of one never moves or removes a sibling.

use sd_charts::ChartKind;
use sd_core::{DetailTable, DistributionEntry, ReportRequest, ReportVariant};

use crate::table::TableBlock;

#[derive(Clone, Debug)]
pub enum Section {
    Title(String),
    Meta {
        generated_at: Option<String>,
        period: Option<(String, String)>,
    },
    KeyValueTable(TableBlock),
    DetailTable(TableBlock),
    /// Raw entries travel with the section; the composer invokes the chart
    /// renderer when it reaches this point and substitutes a fallback block
    /// if rendering fails.
    Chart {
        kind: ChartKind,
        entries: Vec<DistributionEntry>,
    },
    DistributionTable(TableBlock),
}

/// Build the section list for `variant` over `request`.
pub fn sections_for(variant: ReportVariant, request: &ReportRequest) -> Vec<Section> {
    let mut out = Vec::new();

    let title = request
        .title
        .clone()
        .unwrap_or_else(|| variant.default_title().to_string());
    out.push(Section::Title(title));
    out.push(Section::Meta {
        generated_at: request.generated_at.clone(),
        period: request
            .period()
            .map(|(s, e)| (s.to_string(), e.to_string())),
    });

    match variant {
        ReportVariant::General => {
            if let Some(t) = TableBlock::key_value(&request.summary, false) {
                out.push(Section::KeyValueTable(t));
            }
            if let Some(detail) = DetailTable::from_rows(&request.detail_rows) {
                out.push(Section::DetailTable(TableBlock::rows(&detail)));
            }
            if !request.distribution.is_empty() {
                out.push(Section::Chart {
                    kind: ChartKind::Pie,
                    entries: request.distribution.clone(),
                });
                if let Some(t) = TableBlock::distribution("Category", &request.distribution) {
                    out.push(Section::DistributionTable(t));
                }
            }
        }
        ReportVariant::Rejections => {
            if let Some(t) = TableBlock::key_value(&request.summary, true) {
                out.push(Section::KeyValueTable(t));
            }
            if !request.distribution.is_empty() {
                out.push(Section::Chart {
                    kind: ChartKind::Bar,
                    entries: request.distribution.clone(),
                });
                if let Some(t) = TableBlock::distribution("Reason", &request.distribution) {
                    out.push(Section::DistributionTable(t));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::DetailRow;

    fn base_request() -> ReportRequest {
        ReportRequest {
            title: Some("Monthly".into()),
            period_start: Some("2025-01-01".into()),
            period_end: Some("2025-06-30".into()),
            generated_at: Some("2025-07-01 08:00:00 UTC".into()),
            summary: vec![
                ("Total".into(), "120".into()),
                ("Active".into(), "95".into()),
            ],
            detail_rows: vec![
                [("Name", "Luna"), ("Status", "Adopted")]
                    .into_iter()
                    .collect::<DetailRow>(),
                [("Name", "Rex"), ("Status", "Pending")]
                    .into_iter()
                    .collect::<DetailRow>(),
            ],
            distribution: vec![
                DistributionEntry::new("Dog", "70"),
                DistributionEntry::new("Cat", "50"),
            ],
        }
    }

    fn tags(sections: &[Section]) -> Vec<&'static str> {
        sections
            .iter()
            .map(|s| match s {
                Section::Title(_) => "title",
                Section::Meta { .. } => "meta",
                Section::KeyValueTable(_) => "kv",
                Section::DetailTable(_) => "detail",
                Section::Chart { .. } => "chart",
                Section::DistributionTable(_) => "dist",
            })
            .collect()
    }

    #[test]
    fn general_variant_orders_all_sections() {
        let sections = sections_for(ReportVariant::General, &base_request());
        assert_eq!(
            tags(&sections),
            ["title", "meta", "kv", "detail", "chart", "dist"]
        );
        match &sections[4] {
            Section::Chart { kind, entries } => {
                assert_eq!(*kind, ChartKind::Pie);
                assert_eq!(entries.len(), 2);
            }
            other => panic!("expected chart, got {other:?}"),
        }
    }

    #[test]
    fn rejections_variant_has_no_detail_table_and_uses_bars() {
        let sections = sections_for(ReportVariant::Rejections, &base_request());
        assert_eq!(tags(&sections), ["title", "meta", "kv", "chart", "dist"]);
        assert!(matches!(
            sections[3],
            Section::Chart { kind: ChartKind::Bar, .. }
        ));
    }

    #[test]
    fn absent_blocks_are_omitted_independently() {
        let mut request = base_request();
        request.summary.clear();
        request.distribution.clear();
        let sections = sections_for(ReportVariant::General, &request);
        // Detail survives its missing siblings, in position.
        assert_eq!(tags(&sections), ["title", "meta", "detail"]);
    }

    #[test]
    fn empty_request_still_carries_title_and_meta() {
        let request = ReportRequest::default();
        let sections = sections_for(ReportVariant::Rejections, &request);
        assert_eq!(tags(&sections), ["title", "meta"]);
        match &sections[0] {
            Section::Title(t) => assert_eq!(t, "Rejection Reasons Report"),
            other => panic!("expected title, got {other:?}"),
        }
    }

    #[test]
    fn period_requires_both_ends() {
        let mut request = base_request();
        request.period_end = None;
        let sections = sections_for(ReportVariant::General, &request);
        match &sections[1] {
            Section::Meta { period, .. } => assert!(period.is_none()),
            other => panic!("expected meta, got {other:?}"),
        }
    }
}
