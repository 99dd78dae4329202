//! Metric-history analysis: trend, health, RUL and fault fingerprint
//!
//! Both the trend analyzer and the fingerprint scorer read the same
//! [`HistoryStats`], computed once from one chronologically sorted snapshot.
//! [`analyze_history`] is the single entry point that produces a complete
//! [`MachineInsights`]; there is no way to score a fingerprint against a
//! different ordering than the one the health score used.

mod fingerprint;
mod trend;

pub use fingerprint::{clamp_unit, dominant_condition, score_faults};
pub use trend::{
    assess_trend, health_score, rul_hours, severity_from_score, trend_from_change, TrendAssessment,
};

use serde::{Deserialize, Serialize};

use crate::types::{MachineInsights, MetricSample};

/// Aggregates of one metric-history snapshot, in chronological order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoryStats {
    pub sample_count: usize,
    pub first_rms: f64,
    pub last_rms: f64,
    pub last_peak: f64,
    pub last_crest: f64,
    /// Mean RMS over the whole snapshot
    pub avg_rms: f64,
    /// Mean crest factor over the whole snapshot
    pub crest_avg: f64,
    /// (last − first) / first, or 0 when the first RMS is 0
    pub rel_change: f64,
}

/// Sort a snapshot by timestamp (stable) and aggregate it.
///
/// Returns `None` for an empty history: there is no insight to give.
pub fn summarize_history(samples: &[MetricSample]) -> Option<HistoryStats> {
    let mut chronological: Vec<&MetricSample> = samples.iter().collect();
    chronological.sort_by_key(|s| s.timestamp);

    let first = *chronological.first()?;
    let last = *chronological.last()?;
    let n = chronological.len() as f64;

    let avg_rms = chronological.iter().map(|s| s.rms).sum::<f64>() / n;
    let crest_avg = chronological.iter().map(|s| s.crest_factor).sum::<f64>() / n;
    let rel_change = if first.rms != 0.0 {
        (last.rms - first.rms) / first.rms
    } else {
        0.0
    };

    Some(HistoryStats {
        sample_count: chronological.len(),
        first_rms: first.rms,
        last_rms: last.rms,
        last_peak: last.peak,
        last_crest: last.crest_factor,
        avg_rms,
        crest_avg,
        rel_change,
    })
}

/// Derive health, RUL, severity, trend and fault fingerprint from a snapshot.
pub fn analyze_history(samples: &[MetricSample]) -> Option<MachineInsights> {
    let stats = summarize_history(samples)?;
    let trend = assess_trend(&stats);
    let fault_scores = score_faults(&stats);

    tracing::debug!(
        samples = stats.sample_count,
        health = trend.health_score,
        rul_hours = trend.rul_hours,
        severity = %trend.severity,
        trend = %trend.trend_direction,
        overall_risk = fault_scores.overall_risk,
        "Analyzed metric history"
    );

    Some(MachineInsights {
        health_score: trend.health_score,
        rul_hours: trend.rul_hours,
        severity: trend.severity,
        last_rms: stats.last_rms,
        last_peak: stats.last_peak,
        last_crest: stats.last_crest,
        avg_rms: stats.avg_rms,
        trend_direction: trend.trend_direction,
        fault_scores,
    })
}
