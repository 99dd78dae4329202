//! Signal processing module - waveform synthesis, spectrum and envelope
//!
//! The visualization path of the engine: a synthesized waveform for a
//! condition state, its single-sided amplitude spectrum (direct DFT) and a
//! rectified moving-average envelope. Everything here is a pure function of
//! its inputs apart from the synthesizer's noise draw.

mod envelope;
mod spectrum;
mod synthesis;
mod waveform_metrics;

pub use envelope::compute_envelope;
pub use spectrum::{
    compute_spectrum, display_band, extract_peak_amplitude, find_dominant_frequencies,
};
pub use synthesis::{gaussian_noise, synthesize_waveform, synthesize_waveform_with_rng};
pub use waveform_metrics::{summarize_waveform, WaveformSummary};

use thiserror::Error;

/// Errors in signal processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Invalid sampling rate: {0} (must be finite and > 0)")]
    InvalidSamplingRate(f64),

    #[error("Invalid duration: {0} (must be finite and >= 0)")]
    InvalidDuration(f64),
}

pub(crate) fn check_sample_rate(sample_rate_hz: f64) -> Result<(), ProcessingError> {
    if sample_rate_hz.is_finite() && sample_rate_hz > 0.0 {
        Ok(())
    } else {
        Err(ProcessingError::InvalidSamplingRate(sample_rate_hz))
    }
}
