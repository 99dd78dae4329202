//! Per-sample threshold alerts
//!
//! The latest metric sample is checked against configured limits. An RMS
//! breach is HIGH. Peak and crest-factor breaches are MEDIUM and only checked
//! when `alerts.secondary_checks` is on. Each breached limit raises one
//! [`Alert`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AlertConfig;
use crate::types::MetricSample;

/// Alert urgency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    /// Secondary indicator (peak, crest factor)
    Medium = 2,
    /// Overall vibration level (RMS)
    High = 3,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    /// A summary metric exceeded its configured limit
    ThresholdExceeded,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::ThresholdExceeded => write!(f, "THRESHOLD_EXCEEDED"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub machine_id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    /// Metric name: `rms`, `peak` or `crest_factor`
    pub metric: String,
    pub value: f64,
    pub limit: f64,
    pub message: String,
    /// Timestamp of the sample that triggered the alert
    pub timestamp: DateTime<Utc>,
}

/// Check one sample against the configured limits. Equal to the limit passes.
pub fn check_thresholds(machine_id: &str, sample: &MetricSample, limits: &AlertConfig) -> Vec<Alert> {
    let mut checks = vec![("rms", "RMS", sample.rms, limits.rms_limit, AlertSeverity::High)];
    if limits.secondary_checks {
        checks.push(("peak", "Peak", sample.peak, limits.peak_limit, AlertSeverity::Medium));
        checks.push((
            "crest_factor",
            "Crest factor",
            sample.crest_factor,
            limits.crest_factor_limit,
            AlertSeverity::Medium,
        ));
    }

    checks
        .into_iter()
        .filter(|&(_, _, value, limit, _)| value > limit)
        .map(|(metric, label, value, limit, severity)| {
            let alert = Alert {
                machine_id: machine_id.to_string(),
                kind: AlertKind::ThresholdExceeded,
                severity,
                metric: metric.to_string(),
                value,
                limit,
                message: format!("{label} {value:.3} exceeds limit {limit}"),
                timestamp: sample.timestamp,
            };
            tracing::warn!(
                machine_id,
                metric,
                value,
                limit,
                severity = %alert.severity,
                "Threshold exceeded"
            );
            alert
        })
        .collect()
}

/// Check the most recent sample of a history (by timestamp).
pub fn latest_sample_alerts(
    machine_id: &str,
    samples: &[MetricSample],
    limits: &AlertConfig,
) -> Vec<Alert> {
    samples
        .iter()
        .max_by_key(|s| s.timestamp)
        .map(|latest| check_thresholds(machine_id, latest, limits))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minute: i64, rms: f64, peak: f64, crest: f64) -> MetricSample {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap() + Duration::minutes(minute);
        MetricSample::new(ts, rms, peak, crest)
    }

    #[test]
    fn test_quiet_sample_raises_nothing() {
        let alerts = check_thresholds("m1", &at(0, 0.5, 0.9, 1.8), &AlertConfig::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_limits_are_exclusive() {
        let limits = AlertConfig {
            secondary_checks: true,
            ..AlertConfig::default()
        };
        let alerts = check_thresholds("m1", &at(0, 1.0, 2.0, 3.0), &limits);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_default_checks_rms_only() {
        let alerts = check_thresholds("m1", &at(0, 1.2, 4.0, 3.3), &AlertConfig::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].metric, "rms");
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].message, "RMS 1.200 exceeds limit 1");
    }

    #[test]
    fn test_high_crest_alone_is_quiet_by_default() {
        let alerts = check_thresholds("m1", &at(0, 0.46, 1.61, 3.5), &AlertConfig::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_secondary_checks_report_every_breach() {
        let limits = AlertConfig {
            secondary_checks: true,
            ..AlertConfig::default()
        };
        let alerts = check_thresholds("m1", &at(0, 1.2, 4.0, 3.3), &limits);
        let metrics: Vec<&str> = alerts.iter().map(|a| a.metric.as_str()).collect();
        assert_eq!(metrics, vec!["rms", "peak", "crest_factor"]);
        let severities: Vec<AlertSeverity> = alerts.iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![AlertSeverity::High, AlertSeverity::Medium, AlertSeverity::Medium]
        );
        assert!(AlertSeverity::Medium < AlertSeverity::High);
    }

    #[test]
    fn test_only_latest_sample_checked() {
        let samples = vec![at(5, 0.4, 0.7, 1.75), at(0, 1.8, 3.0, 1.7)];
        assert!(latest_sample_alerts("m1", &samples, &AlertConfig::default()).is_empty());
        assert!(latest_sample_alerts("m1", &[], &AlertConfig::default()).is_empty());
    }

    #[test]
    fn test_serialized_spellings() {
        assert_eq!(
            serde_json::to_string(&AlertKind::ThresholdExceeded).unwrap(),
            "\"THRESHOLD_EXCEEDED\""
        );
        assert_eq!(serde_json::to_string(&AlertSeverity::High).unwrap(), "\"HIGH\"");
        assert_eq!(serde_json::to_string(&AlertSeverity::Medium).unwrap(), "\"MEDIUM\"");
    }
}
