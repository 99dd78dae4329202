//! Synthetic vibration waveforms
//!
//! Stand-in data source for the spectral view and the simulator: a 30 Hz
//! shaft component, Gaussian noise, and one additive term per condition
//! state.
//!
//! | State          | Added term                                        |
//! |----------------|---------------------------------------------------|
//! | healthy        | none                                              |
//! | imbalance      | `g · sin(2π·30·t)` (g = 1.2 - 1.5)                |
//! | misalignment   | `0.8 · sin(2π·60·t)`                              |
//! | bearing_fault  | `0.3 · sin(2π·120·t) · (1 + 0.5·sin(2π·5·t))`     |

use rand::Rng;
use rand_distr::Open01;
use std::f64::consts::PI;

use super::{check_sample_rate, ProcessingError};
use crate::config::defaults::{
    SYNTH_BASE_AMPLITUDE, SYNTH_BEARING_CARRIER_HZ, SYNTH_BEARING_GAIN, SYNTH_BEARING_MOD_DEPTH,
    SYNTH_BEARING_MOD_HZ, SYNTH_FUNDAMENTAL_HZ, SYNTH_MISALIGNMENT_GAIN,
};
use crate::config::SynthesisConfig;
use crate::types::{ConditionState, Waveform, WaveformSample};

/// Synthesize a waveform using the thread-local RNG for noise.
pub fn synthesize_waveform(
    state: ConditionState,
    config: &SynthesisConfig,
) -> Result<Waveform, ProcessingError> {
    synthesize_waveform_with_rng(state, config, &mut rand::thread_rng())
}

/// Synthesize `floor(sample_rate · duration)` samples for `state`.
///
/// Pass a seeded RNG for reproducible output.
pub fn synthesize_waveform_with_rng<R: Rng + ?Sized>(
    state: ConditionState,
    config: &SynthesisConfig,
    rng: &mut R,
) -> Result<Waveform, ProcessingError> {
    let sample_rate = config.sample_rate_hz;
    check_sample_rate(sample_rate)?;
    if !config.duration_secs.is_finite() || config.duration_secs < 0.0 {
        return Err(ProcessingError::InvalidDuration(config.duration_secs));
    }

    let n = (sample_rate * config.duration_secs).floor() as usize;
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate;
            let base = SYNTH_BASE_AMPLITUDE * tone(SYNTH_FUNDAMENTAL_HZ, t);
            let noise = gaussian_noise(rng) * config.noise_scale;
            WaveformSample {
                t,
                amplitude: base + noise + condition_term(state, t, config.imbalance_gain),
            }
        })
        .collect();

    tracing::debug!(
        state = %state,
        samples = n,
        sample_rate_hz = sample_rate,
        "Synthesized waveform"
    );

    Ok(Waveform {
        sample_rate_hz: sample_rate,
        samples,
    })
}

/// Standard normal draw via Box-Muller over two uniform draws in (0, 1).
pub fn gaussian_noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = rng.sample(Open01);
    let v: f64 = rng.sample(Open01);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

fn tone(freq_hz: f64, t: f64) -> f64 {
    (2.0 * PI * freq_hz * t).sin()
}

fn condition_term(state: ConditionState, t: f64, imbalance_gain: f64) -> f64 {
    match state {
        ConditionState::Healthy => 0.0,
        ConditionState::Imbalance => imbalance_gain * tone(SYNTH_FUNDAMENTAL_HZ, t),
        ConditionState::Misalignment => {
            SYNTH_MISALIGNMENT_GAIN * tone(2.0 * SYNTH_FUNDAMENTAL_HZ, t)
        }
        ConditionState::BearingFault => {
            SYNTH_BEARING_GAIN
                * tone(SYNTH_BEARING_CARRIER_HZ, t)
                * (1.0 + SYNTH_BEARING_MOD_DEPTH * tone(SYNTH_BEARING_MOD_HZ, t))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_config() -> SynthesisConfig {
        SynthesisConfig {
            noise_scale: 0.0,
            ..SynthesisConfig::default()
        }
    }

    #[test]
    fn test_length_is_floor_of_rate_times_duration() {
        let config = SynthesisConfig {
            sample_rate_hz: 2000.0,
            duration_secs: 0.256,
            ..SynthesisConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let wave =
            synthesize_waveform_with_rng(ConditionState::Healthy, &config, &mut rng).unwrap();
        assert_eq!(wave.len(), 512);
        assert_eq!(wave.samples[0].t, 0.0);
        assert!((wave.samples[1].t - 1.0 / 2000.0).abs() < 1e-15);
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let config = SynthesisConfig::default();
        let a = synthesize_waveform_with_rng(
            ConditionState::BearingFault,
            &config,
            &mut StdRng::seed_from_u64(42),
        )
        .unwrap();
        let b = synthesize_waveform_with_rng(
            ConditionState::BearingFault,
            &config,
            &mut StdRng::seed_from_u64(42),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noiseless_healthy_is_pure_fundamental() {
        let wave = synthesize_waveform_with_rng(
            ConditionState::Healthy,
            &quiet_config(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        for s in &wave.samples {
            let expected = 0.5 * (2.0 * PI * 30.0 * s.t).sin();
            assert!((s.amplitude - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_imbalance_raises_peak_by_gain() {
        let wave = synthesize_waveform_with_rng(
            ConditionState::Imbalance,
            &quiet_config(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let peak = wave
            .samples
            .iter()
            .map(|s| s.amplitude.abs())
            .fold(0.0_f64, f64::max);
        // 0.5 + 1.2; sample 150 (t = 75 ms) sits exactly on a crest
        assert!((peak - 1.7).abs() < 1e-3, "peak = {peak}");
    }

    #[test]
    fn test_gaussian_noise_moments() {
        let mut rng = StdRng::seed_from_u64(1234);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| gaussian_noise(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean = {mean}");
        assert!((var - 1.0).abs() < 0.1, "var = {var}");
        assert!(draws.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let bad_rate = SynthesisConfig {
            sample_rate_hz: 0.0,
            ..SynthesisConfig::default()
        };
        assert_eq!(
            synthesize_waveform_with_rng(ConditionState::Healthy, &bad_rate, &mut rng),
            Err(ProcessingError::InvalidSamplingRate(0.0))
        );
        let bad_duration = SynthesisConfig {
            duration_secs: -1.0,
            ..SynthesisConfig::default()
        };
        assert_eq!(
            synthesize_waveform_with_rng(ConditionState::Healthy, &bad_duration, &mut rng),
            Err(ProcessingError::InvalidDuration(-1.0))
        );
    }

    #[test]
    fn test_zero_duration_is_empty() {
        let config = SynthesisConfig {
            duration_secs: 0.0,
            ..SynthesisConfig::default()
        };
        let wave = synthesize_waveform(ConditionState::Misalignment, &config).unwrap();
        assert!(wave.is_empty());
    }
}
