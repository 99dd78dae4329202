//! Condition engine: the context object callers hold
//!
//! Owns the loaded [`EngineConfig`] and nothing else. Every call recomputes
//! from its inputs; there is no cached insight, no timer and no shared
//! mutable state, so one engine can serve any number of callers.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::alerts::{latest_sample_alerts, Alert};
use crate::analysis::{analyze_history, dominant_condition};
use crate::config::EngineConfig;
use crate::diagnostics::{build_profile, signature_spectrum, spectrum_reference_markers};
use crate::history::synthetic_history;
use crate::processing::{
    compute_envelope, compute_spectrum, display_band, extract_peak_amplitude,
    find_dominant_frequencies, summarize_waveform, synthesize_waveform_with_rng, ProcessingError,
    WaveformSummary,
};
use crate::types::{
    ConditionState, EnvelopePoint, FrequencyMarker, MachineInsights, MachineTypeProfile,
    MetricSample, SpectralBin, Waveform,
};

/// Bandwidth used when reading a spectrum at a reference marker (Hz)
pub const MARKER_BANDWIDTH_HZ: f64 = 4.0;

/// Everything the engine can say about one machine from one history snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineReport {
    pub machine_id: String,
    pub generated_at: DateTime<Utc>,
    /// True when the supplied history was empty and a synthetic one was used
    pub used_fallback: bool,
    pub insights: MachineInsights,
    /// Condition state whose fault score dominates
    pub dominant_condition: ConditionState,
    pub profile: MachineTypeProfile,
    pub alerts: Vec<Alert>,
}

/// Synthesized capture for a condition state, with its derived views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpectralView {
    pub state: ConditionState,
    pub waveform: Waveform,
    pub summary: WaveformSummary,
    /// Spectrum limited to the display band
    pub spectrum: Vec<SpectralBin>,
    pub envelope: Vec<EnvelopePoint>,
    /// Largest local maxima of the display spectrum, largest first
    pub dominant_peaks: Vec<SpectralBin>,
    /// Shaft harmonics and bearing bands read off the display spectrum
    pub reference_markers: Vec<MarkerReading>,
}

/// Spectrum amplitude read at a reference marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerReading {
    pub label: String,
    pub frequency: f64,
    pub amplitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ConditionEngine {
    config: EngineConfig,
}

impl ConditionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a machine, substituting a synthetic history when `samples` is empty.
    ///
    /// Returns `None` only if the fallback history is configured with zero points.
    pub fn analyze(&self, machine_id: &str, samples: &[MetricSample]) -> Option<MachineReport> {
        self.analyze_at(machine_id, samples, Utc::now(), &mut rand::thread_rng())
    }

    /// [`analyze`](Self::analyze) with an explicit clock and RNG.
    pub fn analyze_at<R: Rng + ?Sized>(
        &self,
        machine_id: &str,
        samples: &[MetricSample],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<MachineReport> {
        let fallback;
        let (history, used_fallback) = if samples.is_empty() {
            fallback = synthetic_history(machine_id, &self.config.fallback_history, now, rng);
            (fallback.as_slice(), true)
        } else {
            (samples, false)
        };

        let insights = analyze_history(history)?;
        let profile = build_profile(machine_id, &insights.fault_scores, &self.config.machine);
        let alerts = latest_sample_alerts(machine_id, history, &self.config.alerts);

        tracing::info!(
            machine_id,
            samples = history.len(),
            used_fallback,
            health = insights.health_score,
            severity = %insights.severity,
            machine_type = %profile.machine_type,
            alerts = alerts.len(),
            "Machine analyzed"
        );

        Some(MachineReport {
            machine_id: machine_id.to_string(),
            generated_at: now,
            used_fallback,
            dominant_condition: dominant_condition(&insights.fault_scores),
            insights,
            profile,
            alerts,
        })
    }

    pub fn spectral_view(&self, state: ConditionState) -> Result<SpectralView, ProcessingError> {
        self.spectral_view_with_rng(state, &mut rand::thread_rng())
    }

    /// Synthesize a capture for `state` and derive spectrum, envelope and peaks.
    pub fn spectral_view_with_rng<R: Rng + ?Sized>(
        &self,
        state: ConditionState,
        rng: &mut R,
    ) -> Result<SpectralView, ProcessingError> {
        let waveform = synthesize_waveform_with_rng(state, &self.config.synthesis, rng)?;
        let full = compute_spectrum(&waveform)?;
        let spectrum = display_band(&full, self.config.spectrum.display_max_hz);
        let dominant_peaks = find_dominant_frequencies(&spectrum, self.config.spectrum.peak_count);
        let envelope = compute_envelope(&waveform, self.config.envelope.half_window);
        let summary = summarize_waveform(&waveform);
        let reference_markers =
            read_markers(&spectrum, &spectrum_reference_markers(&self.config.machine));

        Ok(SpectralView {
            state,
            waveform,
            summary,
            spectrum,
            envelope,
            dominant_peaks,
            reference_markers,
        })
    }

    /// Synthetic family signature spectrum for a profile (empty for pump, fan, unknown).
    pub fn signature<R: Rng + ?Sized>(
        &self,
        profile: &MachineTypeProfile,
        rng: &mut R,
    ) -> Vec<SpectralBin> {
        signature_spectrum(profile.type_faults.as_ref(), &self.config.machine, rng)
    }
}

/// Read the spectrum at each marker (peak within ±2 Hz).
pub fn read_markers(bins: &[SpectralBin], markers: &[FrequencyMarker]) -> Vec<MarkerReading> {
    markers
        .iter()
        .map(|m| MarkerReading {
            label: m.label.clone(),
            frequency: m.frequency,
            amplitude: extract_peak_amplitude(bins, m.frequency, MARKER_BANDWIDTH_HZ),
        })
        .collect()
}
