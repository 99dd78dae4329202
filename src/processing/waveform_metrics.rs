//! Summary metrics (RMS, peak, crest factor) of a raw waveform
//!
//! This is how a collector condenses one capture into the [`MetricSample`]
//! that the trend analyzer consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MetricSample, Waveform};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WaveformSummary {
    pub rms: f64,
    pub peak: f64,
    /// peak / rms, or 0 for a silent capture
    pub crest_factor: f64,
}

impl WaveformSummary {
    pub fn into_sample(self, timestamp: DateTime<Utc>, status: impl Into<String>) -> MetricSample {
        MetricSample::new(timestamp, self.rms, self.peak, self.crest_factor).with_status(status)
    }
}

/// Compute RMS, absolute peak and crest factor. An empty capture is all zeros.
pub fn summarize_waveform(waveform: &Waveform) -> WaveformSummary {
    if waveform.is_empty() {
        return WaveformSummary::default();
    }

    let n = waveform.len() as f64;
    let sum_squares: f64 = waveform.samples.iter().map(|s| s.amplitude * s.amplitude).sum();
    let rms = (sum_squares / n).sqrt();
    let peak = waveform
        .samples
        .iter()
        .map(|s| s.amplitude.abs())
        .fold(0.0_f64, f64::max);
    let crest_factor = if rms > 0.0 { peak / rms } else { 0.0 };

    WaveformSummary {
        rms,
        peak,
        crest_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WaveformSample;
    use std::f64::consts::PI;

    #[test]
    fn test_sine_crest_factor_is_sqrt2() {
        let samples = (0..1000)
            .map(|i| {
                let t = i as f64 / 1000.0;
                WaveformSample {
                    t,
                    amplitude: (2.0 * PI * 10.0 * t).sin(),
                }
            })
            .collect();
        let summary = summarize_waveform(&Waveform {
            sample_rate_hz: 1000.0,
            samples,
        });
        assert!((summary.rms - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!((summary.peak - 1.0).abs() < 1e-9);
        assert!((summary.crest_factor - std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_silent_capture() {
        let samples = vec![WaveformSample { t: 0.0, amplitude: 0.0 }; 4];
        let summary = summarize_waveform(&Waveform {
            sample_rate_hz: 1.0,
            samples,
        });
        assert_eq!(summary, WaveformSummary::default());
    }

    #[test]
    fn test_into_sample_carries_status() {
        let summary = WaveformSummary {
            rms: 0.5,
            peak: 0.9,
            crest_factor: 1.8,
        };
        let sample = summary.into_sample(Utc::now(), "imbalance");
        assert_eq!(sample.status, "imbalance");
        assert_eq!(sample.crest_factor, 1.8);
    }
}
