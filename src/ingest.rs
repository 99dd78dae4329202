//! Metric record ingestion
//!
//! Accepts either a JSON array of records or JSON lines (one record per
//! line, as the simulator emits). Each record is a [`RawMetricSample`] plus
//! an optional `machine_id`. Malformed lines and records that fail
//! validation are skipped with a warning; only an unparseable JSON array
//! fails the whole document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MetricSample, RawMetricSample};

/// One collector record: a raw sample tagged with the machine it came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    #[serde(flatten)]
    pub sample: RawMetricSample,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid JSON array: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse records from a JSON array or JSON-lines document.
pub fn parse_records(text: &str) -> Result<Vec<MetricRecord>, IngestError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut records = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<MetricRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "Skipping malformed metric record");
            }
        }
    }
    Ok(records)
}

/// Validate records and group them per machine, preserving input order
/// within each machine. Records without a `machine_id` go to `default_machine`.
///
/// A record that fails validation is logged with its [`crate::types::SampleError`] and
/// dropped; the rest of the document is kept.
pub fn group_by_machine(
    records: Vec<MetricRecord>,
    default_machine: &str,
) -> BTreeMap<String, Vec<MetricSample>> {
    let mut grouped: BTreeMap<String, Vec<MetricSample>> = BTreeMap::new();
    for (index, record) in records.into_iter().enumerate() {
        let machine_id = record
            .machine_id
            .unwrap_or_else(|| default_machine.to_string());
        match record.sample.validate(index) {
            Ok(sample) => grouped.entry(machine_id).or_default().push(sample),
            Err(e) => {
                tracing::warn!(machine_id = %machine_id, error = %e, "Skipping invalid metric record");
            }
        }
    }
    grouped
}

/// Parse and validate a document into per-machine histories.
pub fn load_histories(
    text: &str,
    default_machine: &str,
) -> Result<BTreeMap<String, Vec<MetricSample>>, IngestError> {
    let records = parse_records(text)?;
    let count = records.len();
    let grouped = group_by_machine(records, default_machine);
    let kept: usize = grouped.values().map(Vec::len).sum();
    tracing::debug!(
        records = count,
        kept,
        machines = grouped.len(),
        "Loaded metric histories"
    );
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleError;

    #[test]
    fn test_invalid_record_is_skipped_not_fatal() {
        let text = "{\"machine_id\":\"m1\",\"timestamp\":\"2024-01-01T00:00:00Z\",\"rms\":0.4}\n\
                    {\"machine_id\":\"m1\",\"timestamp\":\"2024-01-01T00:01:00Z\",\"rms\":0.5}\n\
                    {\"machine_id\":\"m2\",\"timestamp\":\"2024-01-01T00:01:00Z\",\"rms\":-0.01}\n\
                    {\"machine_id\":\"m1\",\"timestamp\":\"soon\",\"rms\":0.6}\n";
        let grouped = load_histories(text, "m1").unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["m1"].len(), 2);
        assert_eq!(grouped["m1"][1].rms, 0.5);
    }

    #[test]
    fn test_json_array() {
        let text = r#"[
            {"machine_id": "m1", "timestamp": "2024-01-01T00:00:00Z", "rms": 0.4},
            {"timestamp": "2024-01-01T00:01:00Z", "rms": 0.5}
        ]"#;
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].machine_id.as_deref(), Some("m1"));
        assert_eq!(records[1].sample.rms, Some(0.5));
    }

    #[test]
    fn test_json_lines_skip_malformed() {
        let text = "{\"machine_id\":\"m1\",\"timestamp\":\"2024-01-01T00:00:00Z\",\"rms\":0.4}\n\
                    not json\n\
                    \n\
                    {\"machine_id\":\"m2\",\"timestamp\":\"2024-01-01T00:00:00Z\",\"rms\":0.7}\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_broken_array_is_an_error() {
        assert!(matches!(parse_records("[{"), Err(IngestError::Json(_))));
    }

    #[test]
    fn test_grouping_and_default_machine() {
        let text = r#"[
            {"machine_id": "m2", "timestamp": "2024-01-01T00:00:00Z", "rms": 0.4},
            {"timestamp": "2024-01-01T00:01:00Z", "rms": 0.5},
            {"machine_id": "m2", "timestamp": "2024-01-01T00:02:00Z", "rms": 0.6}
        ]"#;
        let grouped = group_by_machine(parse_records(text).unwrap(), "fallback");
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["m2"].len(), 2);
        assert_eq!(grouped["m2"][1].rms, 0.6);
        assert_eq!(grouped["fallback"].len(), 1);
    }

    #[test]
    fn test_record_errors_carry_global_index() {
        let records = parse_records(
            r#"[
            {"machine_id": "m1", "timestamp": "2024-01-01T00:00:00Z"},
            {"machine_id": "m2", "rms": 0.5}
        ]"#,
        )
        .unwrap();
        let err = records[1].sample.clone().validate(1).unwrap_err();
        assert_eq!(err, SampleError::MissingTimestamp { index: 1 });
        let grouped = group_by_machine(records, "x");
        assert_eq!(grouped.len(), 1);
        assert!(grouped.contains_key("m1"));
    }
}
