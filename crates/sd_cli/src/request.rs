//! Wire-format request DTO (JSON) and its normalization into core types.
//!
//! Summary and detail rows arrive as JSON objects; `serde_json`'s
//! `preserve_order` feature keeps their key order, which the renderer then
//! preserves all the way into the tables. Scalars are stringified here and
//! `null` becomes the empty string, never a literal "null" token. The
//! detail-row column contract itself is enforced later, in
//! `sd_core::DetailTable`.

use serde::Deserialize;
use serde_json::{Map, Value};

use sd_core::{DetailRow, DistributionEntry, ReportRequest};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestDto {
    pub title: Option<String>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub summary: Map<String, Value>,
    pub detail_rows: Vec<Map<String, Value>>,
    pub distribution: Vec<DistributionDto>,
}

#[derive(Debug, Deserialize)]
pub struct DistributionDto {
    pub label: String,
    /// Accepts a JSON number or an integer-like string.
    #[serde(default)]
    pub count: Value,
}

impl RequestDto {
    /// Normalize into the core request. `generated_at` stays unset; the
    /// caller stamps it.
    pub fn into_request(self) -> ReportRequest {
        ReportRequest {
            title: self.title,
            period_start: self.period_start,
            period_end: self.period_end,
            generated_at: None,
            summary: self
                .summary
                .iter()
                .map(|(k, v)| (k.clone(), scalar(v)))
                .collect(),
            detail_rows: self
                .detail_rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|(k, v)| (k.clone(), scalar(v)))
                        .collect::<DetailRow>()
                })
                .collect(),
            distribution: self
                .distribution
                .into_iter()
                .map(|d| DistributionEntry::new(d.label, scalar(&d.count)))
                .collect(),
        }
    }
}

/// Display form of a JSON scalar; null is empty, not "null".
fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_order_survives_the_wire() {
        let dto: RequestDto = serde_json::from_str(
            r#"{"summary": {"Zebra": 1, "Alpha": 2, "Mid": 3}}"#,
        )
        .unwrap();
        let request = dto.into_request();
        let keys: Vec<&str> = request.summary.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Zebra", "Alpha", "Mid"]);
    }

    #[test]
    fn scalars_stringify_and_null_is_empty() {
        let dto: RequestDto = serde_json::from_str(
            r#"{
                "summary": {"Count": 42, "Rate": 58.3, "Open": true, "Note": null},
                "distribution": [{"label": "Dog", "count": 70}]
            }"#,
        )
        .unwrap();
        let request = dto.into_request();
        assert_eq!(request.summary[0].1, "42");
        assert_eq!(request.summary[1].1, "58.3");
        assert_eq!(request.summary[2].1, "true");
        assert_eq!(request.summary[3].1, "");
        assert_eq!(request.distribution[0].parsed_count(), Some(70));
    }

    #[test]
    fn string_counts_pass_through() {
        let dto: RequestDto = serde_json::from_str(
            r#"{"distribution": [{"label": "Cat", "count": "50"}, {"label": "Fox"}]}"#,
        )
        .unwrap();
        let request = dto.into_request();
        assert_eq!(request.distribution[0].parsed_count(), Some(50));
        // Absent count defaults to null, which never parses.
        assert_eq!(request.distribution[1].parsed_count(), None);
    }
}
