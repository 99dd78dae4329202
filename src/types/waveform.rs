//! Time-domain and frequency-domain signal types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Condition State
// ============================================================================

/// Machine condition used to drive the waveform synthesizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionState {
    #[default]
    Healthy,
    Imbalance,
    Misalignment,
    BearingFault,
}

impl ConditionState {
    /// All states, in the order the simulator cycles through them.
    pub const ALL: [ConditionState; 4] = [
        ConditionState::Healthy,
        ConditionState::Imbalance,
        ConditionState::Misalignment,
        ConditionState::BearingFault,
    ];

    /// Wire name (matches the serde spelling)
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionState::Healthy => "healthy",
            ConditionState::Imbalance => "imbalance",
            ConditionState::Misalignment => "misalignment",
            ConditionState::BearingFault => "bearing_fault",
        }
    }

    /// Short description of the spectral signature this state produces.
    pub fn description(&self) -> &'static str {
        match self {
            ConditionState::Healthy => "Baseline vibration with low noise.",
            ConditionState::Imbalance => "Elevated 1× rotational frequency amplitude.",
            ConditionState::Misalignment => "Stronger 2× rotational component.",
            ConditionState::BearingFault => "High-frequency modulated impacts.",
        }
    }
}

impl std::fmt::Display for ConditionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a condition state name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown condition state '{0}' (expected healthy, imbalance, misalignment or bearing_fault)")]
pub struct ParseConditionStateError(pub String);

impl FromStr for ConditionState {
    type Err = ParseConditionStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "healthy" => Ok(ConditionState::Healthy),
            "imbalance" => Ok(ConditionState::Imbalance),
            "misalignment" => Ok(ConditionState::Misalignment),
            "bearing_fault" | "bearing" => Ok(ConditionState::BearingFault),
            _ => Err(ParseConditionStateError(s.to_string())),
        }
    }
}

// ============================================================================
// Waveform
// ============================================================================

/// One point of a time-domain vibration signal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WaveformSample {
    /// Seconds from the start of the capture
    pub t: f64,
    pub amplitude: f64,
}

/// A captured (or synthesized) waveform together with its sampling rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waveform {
    pub sample_rate_hz: f64,
    pub samples: Vec<WaveformSample>,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Amplitude values only, in sample order.
    pub fn amplitudes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.amplitude).collect()
    }
}

// ============================================================================
// Spectrum / Envelope
// ============================================================================

/// One bin of a single-sided amplitude spectrum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpectralBin {
    /// Bin centre frequency (Hz)
    pub frequency: f64,
    pub amplitude: f64,
}

/// Rectified, smoothed amplitude at one waveform index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnvelopePoint {
    /// Milliseconds from the start of the capture
    pub t_ms: f64,
    pub envelope: f64,
}
