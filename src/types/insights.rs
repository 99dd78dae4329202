//! Condition-scoring outputs: fault fingerprint and machine insights

use serde::{Deserialize, Serialize};

/// Overall machine severity derived from the health score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Healthy,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Healthy => write!(f, "Healthy"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// Direction of RMS movement between the first and last sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "rising"),
            TrendDirection::Falling => write!(f, "falling"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Four normalized fault likelihoods plus their maximum.
///
/// Build with [`FaultScores::new`] so that `overall_risk` always equals the
/// largest of the four component scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FaultScores {
    pub imbalance: f64,
    pub misalignment: f64,
    pub bearing: f64,
    pub looseness: f64,
    pub overall_risk: f64,
}

impl FaultScores {
    pub fn new(imbalance: f64, misalignment: f64, bearing: f64, looseness: f64) -> Self {
        let overall_risk = imbalance.max(misalignment).max(bearing).max(looseness);
        Self {
            imbalance,
            misalignment,
            bearing,
            looseness,
            overall_risk,
        }
    }

    /// Component scores with their display names, in fingerprint order.
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("imbalance", self.imbalance),
            ("misalignment", self.misalignment),
            ("bearing", self.bearing),
            ("looseness", self.looseness),
        ]
    }
}

/// Everything derived from one metric-history snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineInsights {
    /// 0-100, higher is healthier
    pub health_score: f64,
    /// Remaining useful life (hours): 24, 72, 168, 360 or 720
    pub rul_hours: u32,
    pub severity: Severity,
    pub last_rms: f64,
    pub last_peak: f64,
    pub last_crest: f64,
    pub avg_rms: f64,
    pub trend_direction: TrendDirection,
    pub fault_scores: FaultScores,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_risk_is_max() {
        let scores = FaultScores::new(0.2, 0.65, 0.125, 0.215);
        assert_eq!(scores.overall_risk, 0.65);
    }

    #[test]
    fn test_serde_spellings() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"Warning\"");
        assert_eq!(
            serde_json::to_string(&TrendDirection::Rising).unwrap(),
            "\"rising\""
        );
    }
}
