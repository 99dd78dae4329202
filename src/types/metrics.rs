//! Summary metric samples and their boundary validation
//!
//! Metric records arrive from an external collector as loosely-shaped JSON.
//! [`RawMetricSample`] mirrors that shape with every field optional;
//! [`validate_samples`] turns a batch into typed [`MetricSample`]s, defaulting
//! missing numeric fields to zero and rejecting records that cannot be placed
//! on a timeline.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status recorded when the collector did not supply one.
pub const UNKNOWN_STATUS: &str = "unknown";

/// One summary-metric observation for a machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    /// Root-mean-square amplitude
    pub rms: f64,
    /// Absolute peak amplitude
    pub peak: f64,
    /// peak / rms
    pub crest_factor: f64,
    pub status: String,
}

impl MetricSample {
    pub fn new(timestamp: DateTime<Utc>, rms: f64, peak: f64, crest_factor: f64) -> Self {
        Self {
            timestamp,
            rms,
            peak,
            crest_factor,
            status: UNKNOWN_STATUS.to_string(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Metric record as received from the collector, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetricSample {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub rms: Option<f64>,
    #[serde(default)]
    pub peak: Option<f64>,
    #[serde(default)]
    pub crest_factor: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Rejected metric record.
#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("record {index}: missing timestamp")]
    MissingTimestamp { index: usize },

    #[error("record {index}: unparseable timestamp '{value}'")]
    InvalidTimestamp { index: usize, value: String },

    #[error("record {index}: field '{field}' must be finite and >= 0 (got {value})")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one interpreted as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl RawMetricSample {
    /// Validate this record; `index` is its position in the batch (for error messages).
    pub fn validate(self, index: usize) -> Result<MetricSample, SampleError> {
        let raw_ts = self
            .timestamp
            .ok_or(SampleError::MissingTimestamp { index })?;
        let timestamp = parse_timestamp(&raw_ts).ok_or_else(|| SampleError::InvalidTimestamp {
            index,
            value: raw_ts.clone(),
        })?;

        let rms = checked_field(index, "rms", self.rms)?;
        let peak = checked_field(index, "peak", self.peak)?;
        let crest_factor = checked_field(index, "crest_factor", self.crest_factor)?;

        Ok(MetricSample {
            timestamp,
            rms,
            peak,
            crest_factor,
            status: self.status.unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        })
    }
}

impl From<MetricSample> for RawMetricSample {
    /// Wire form of a validated sample, as a collector would emit it.
    fn from(sample: MetricSample) -> Self {
        Self {
            timestamp: Some(sample.timestamp.to_rfc3339()),
            rms: Some(sample.rms),
            peak: Some(sample.peak),
            crest_factor: Some(sample.crest_factor),
            status: Some(sample.status),
        }
    }
}

fn checked_field(index: usize, field: &'static str, value: Option<f64>) -> Result<f64, SampleError> {
    let value = value.unwrap_or(0.0);
    if !value.is_finite() || value < 0.0 {
        return Err(SampleError::InvalidField { index, field, value });
    }
    Ok(value)
}

/// Validate a batch of raw records. Input order is preserved; sorting happens
/// inside the analyzer.
pub fn validate_samples(raw: Vec<RawMetricSample>) -> Result<Vec<MetricSample>, SampleError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}
