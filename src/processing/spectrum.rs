//! Single-sided amplitude spectrum via direct DFT
//!
//! Captures are a few hundred to a couple of thousand samples, so the
//! O(n²) transform is used as-is. No windowing is applied.
//!
//! # Convention
//!
//! For `k in 0..n/2`:
//!
//! ```text
//! re = Σ x[i]·cos(−2πki/n)      im = Σ x[i]·sin(−2πki/n)
//! amplitude = (2/n)·√(re² + im²)   frequency = k·fs/n
//! ```
//!
//! The `2/n` factor folds negative-frequency energy into the positive half,
//! so a sine of amplitude `A` on an exact bin reads `A`. It is applied to the
//! DC bin too (a constant `c` reads `2c`).
//!
//! # Example
//!
//! ```ignore
//! let wave = synthesize_waveform(ConditionState::Misalignment, &config.synthesis)?;
//! let spectrum = compute_spectrum(&wave)?;
//! let visible = display_band(&spectrum, config.spectrum.display_max_hz);
//! let peaks = find_dominant_frequencies(&visible, 5);
//! ```

use std::f64::consts::PI;

use super::{check_sample_rate, ProcessingError};
use crate::types::{SpectralBin, Waveform};

/// Compute the single-sided amplitude spectrum of a waveform.
///
/// Returns `floor(n/2)` bins at `k·fs/n`, strictly increasing in frequency.
/// An empty waveform yields an empty spectrum.
pub fn compute_spectrum(waveform: &Waveform) -> Result<Vec<SpectralBin>, ProcessingError> {
    check_sample_rate(waveform.sample_rate_hz)?;

    let values = waveform.amplitudes();
    let n = values.len();
    let sample_rate = waveform.sample_rate_hz;

    let bins: Vec<SpectralBin> = (0..n / 2)
        .map(|k| {
            let (re, im) = values.iter().enumerate().fold((0.0, 0.0), |(re, im), (i, &x)| {
                // (k·i) mod n keeps the angle small without changing its value
                let angle = -2.0 * PI * ((k * i) % n) as f64 / n as f64;
                (re + x * angle.cos(), im + x * angle.sin())
            });
            SpectralBin {
                frequency: k as f64 * sample_rate / n as f64,
                amplitude: (2.0 / n as f64) * (re * re + im * im).sqrt(),
            }
        })
        .collect();

    tracing::debug!(
        samples = n,
        bins = bins.len(),
        resolution_hz = if n > 0 { sample_rate / n as f64 } else { 0.0 },
        "Computed DFT spectrum"
    );

    Ok(bins)
}

/// Keep only bins at or below `max_hz` (the display band).
pub fn display_band(bins: &[SpectralBin], max_hz: f64) -> Vec<SpectralBin> {
    bins.iter().copied().filter(|b| b.frequency <= max_hz).collect()
}

/// Extract peak amplitude at a specific frequency with given bandwidth.
///
/// Finds the maximum amplitude within ±bandwidth/2 of the target frequency.
/// Used to read the spectrum at reference markers (1×, mesh, sidebands).
pub fn extract_peak_amplitude(bins: &[SpectralBin], target_freq: f64, bandwidth: f64) -> f64 {
    let half_bw = bandwidth / 2.0;
    let low_freq = target_freq - half_bw;
    let high_freq = target_freq + half_bw;

    bins.iter()
        .filter(|b| b.frequency >= low_freq && b.frequency <= high_freq)
        .map(|b| b.amplitude)
        .fold(0.0_f64, f64::max)
}

/// Find dominant frequencies using true peak detection.
///
/// Identifies local maxima (bins strictly higher than both neighbours), then
/// returns the top `n_peaks` by amplitude, largest first.
pub fn find_dominant_frequencies(bins: &[SpectralBin], n_peaks: usize) -> Vec<SpectralBin> {
    if bins.len() < 3 {
        let mut all = bins.to_vec();
        all.sort_by(|a, b| b.amplitude.total_cmp(&a.amplitude));
        all.truncate(n_peaks);
        return all;
    }

    let mut peaks: Vec<SpectralBin> = bins
        .windows(3)
        .filter(|w| w[1].amplitude > w[0].amplitude && w[1].amplitude > w[2].amplitude)
        .map(|w| w[1])
        .collect();

    peaks.sort_by(|a, b| b.amplitude.total_cmp(&a.amplitude));
    peaks.truncate(n_peaks);
    peaks
}

// ============================================================================
// Tests
// ============================================================================
