//! Fault fingerprint scoring
//!
//! Linear heuristics over the history aggregates. Each score lands in
//! [0, 1]; `overall_risk` is the largest of the four.

use super::HistoryStats;
use crate::config::defaults::{
    BEARING_CREST_FULL_SCALE, CREST_FACTOR_BASELINE, IMBALANCE_RMS_FULL_SCALE,
    LOOSENESS_RMS_FULL_SCALE, MISALIGNMENT_BIAS,
};
use crate::types::{ConditionState, FaultScores};

/// `min(1, max(0, x))`
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

pub fn score_faults(stats: &HistoryStats) -> FaultScores {
    let imbalance = clamp_unit(stats.last_rms / IMBALANCE_RMS_FULL_SCALE);
    let bearing =
        clamp_unit((stats.crest_avg - CREST_FACTOR_BASELINE).max(0.0) / BEARING_CREST_FULL_SCALE);
    let misalignment = clamp_unit(MISALIGNMENT_BIAS + stats.rel_change);
    let looseness = clamp_unit(stats.avg_rms / LOOSENESS_RMS_FULL_SCALE);

    FaultScores::new(imbalance, misalignment, bearing, looseness)
}

/// Condition state whose score is highest.
///
/// Ties go to the first in imbalance, misalignment, bearing, looseness
/// order. Looseness has no waveform signature of its own and maps to
/// healthy, as does an all-zero fingerprint.
pub fn dominant_condition(scores: &FaultScores) -> ConditionState {
    let ranked = [
        (scores.imbalance, ConditionState::Imbalance),
        (scores.misalignment, ConditionState::Misalignment),
        (scores.bearing, ConditionState::BearingFault),
        (scores.looseness, ConditionState::Healthy),
    ];

    let mut best = (0.0_f64, ConditionState::Healthy);
    for (score, state) in ranked {
        if score > best.0 {
            best = (score, state);
        }
    }
    best.1
}
