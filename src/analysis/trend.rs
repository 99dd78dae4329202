//! Trend direction, health score, RUL ladder and severity

use serde::{Deserialize, Serialize};

use super::HistoryStats;
use crate::config::defaults::{
    CREST_FACTOR_BASELINE, HEALTH_CREST_WEIGHT, HEALTH_RMS_WEIGHT, RUL_FLOOR_HOURS, RUL_LADDER,
    SEVERITY_CRITICAL_BELOW, SEVERITY_WARNING_BELOW, TREND_CHANGE_THRESHOLD, TREND_EPSILON,
};
use crate::types::{Severity, TrendDirection};

/// Trend half of [`MachineInsights`](crate::types::MachineInsights).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendAssessment {
    pub health_score: f64,
    pub rul_hours: u32,
    pub severity: Severity,
    pub trend_direction: TrendDirection,
}

/// Classify a relative RMS change. Exactly ±0.15 is stable.
///
/// The comparison tolerates rounding noise of a few ULP so that a change
/// that is 0.15 in decimal (0.40 → 0.46) but not in binary stays stable.
pub fn trend_from_change(rel_change: f64) -> TrendDirection {
    if rel_change > TREND_CHANGE_THRESHOLD + TREND_EPSILON {
        TrendDirection::Rising
    } else if rel_change < -TREND_CHANGE_THRESHOLD - TREND_EPSILON {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    }
}

/// `100 − (last_rms·40 + max(0, crest_avg − 3)·15)`, clamped to [0, 100].
pub fn health_score(last_rms: f64, crest_avg: f64) -> f64 {
    let crest_excess = (crest_avg - CREST_FACTOR_BASELINE).max(0.0);
    let raw = 100.0 - (last_rms * HEALTH_RMS_WEIGHT + crest_excess * HEALTH_CREST_WEIGHT);
    raw.clamp(0.0, 100.0)
}

/// Remaining useful life from the health ladder (inclusive lower bounds).
pub fn rul_hours(health_score: f64) -> u32 {
    RUL_LADDER
        .iter()
        .find(|(floor, _)| health_score >= *floor)
        .map(|&(_, hours)| hours)
        .unwrap_or(RUL_FLOOR_HOURS)
}

pub fn severity_from_score(health_score: f64) -> Severity {
    if health_score < SEVERITY_CRITICAL_BELOW {
        Severity::Critical
    } else if health_score < SEVERITY_WARNING_BELOW {
        Severity::Warning
    } else {
        Severity::Healthy
    }
}

pub fn assess_trend(stats: &HistoryStats) -> TrendAssessment {
    let health = health_score(stats.last_rms, stats.crest_avg);
    TrendAssessment {
        health_score: health,
        rul_hours: rul_hours(health),
        severity: severity_from_score(health),
        trend_direction: trend_from_change(stats.rel_change),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_boundaries() {
        assert_eq!(trend_from_change(0.15), TrendDirection::Stable);
        assert_eq!(trend_from_change(0.1500001), TrendDirection::Rising);
        assert_eq!(trend_from_change(-0.15), TrendDirection::Stable);
        assert_eq!(trend_from_change(-0.1500001), TrendDirection::Falling);
        assert_eq!(trend_from_change(0.0), TrendDirection::Stable);
    }

    #[test]
    fn test_decimal_fifteen_percent_is_stable() {
        let rel = (0.46 - 0.40) / 0.40;
        assert_eq!(trend_from_change(rel), TrendDirection::Stable);
    }

    #[test]
    fn test_rul_ladder_boundaries() {
        assert_eq!(rul_hours(100.0), 720);
        assert_eq!(rul_hours(85.0), 720);
        assert_eq!(rul_hours(84.999), 360);
        assert_eq!(rul_hours(70.0), 360);
        assert_eq!(rul_hours(69.999), 168);
        assert_eq!(rul_hours(55.0), 168);
        assert_eq!(rul_hours(54.999), 72);
        assert_eq!(rul_hours(40.0), 72);
        assert_eq!(rul_hours(39.999), 24);
        assert_eq!(rul_hours(0.0), 24);
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(severity_from_score(49.999), Severity::Critical);
        assert_eq!(severity_from_score(50.0), Severity::Warning);
        assert_eq!(severity_from_score(74.999), Severity::Warning);
        assert_eq!(severity_from_score(75.0), Severity::Healthy);
    }

    #[test]
    fn test_health_score_clamps() {
        assert_eq!(health_score(0.0, 0.0), 100.0);
        assert_eq!(health_score(10.0, 3.0), 0.0);
        // crest below baseline contributes nothing
        assert_eq!(health_score(0.5, 1.0), 80.0);
    }

    #[test]
    fn test_health_score_bounded_over_grid() {
        for rms in [0.0, 0.1, 0.5, 1.0, 2.5, 10.0, 1e6] {
            for crest in [0.0, 1.0, 3.0, 4.5, 10.0, 1e6] {
                let h = health_score(rms, crest);
                assert!((0.0..=100.0).contains(&h), "rms={rms} crest={crest} h={h}");
            }
        }
    }
}
