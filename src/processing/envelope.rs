//! Rectified moving-average envelope

use crate::types::{EnvelopePoint, Waveform};

/// Rectify the waveform and smooth it with a centred moving average.
///
/// The window spans `half_window` samples either side of each index and is
/// clipped at the ends of the sequence; the divisor is the number of samples
/// actually inside the window. Output is index-aligned with the input.
pub fn compute_envelope(waveform: &Waveform, half_window: usize) -> Vec<EnvelopePoint> {
    let n = waveform.samples.len();
    if n == 0 {
        return Vec::new();
    }

    // prefix[i] = sum of |x| over samples[..i]
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0_f64);
    let mut acc = 0.0;
    for s in &waveform.samples {
        acc += s.amplitude.abs();
        prefix.push(acc);
    }

    waveform
        .samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let lo = i.saturating_sub(half_window);
            let hi = (i + half_window).min(n - 1);
            let count = (hi - lo + 1) as f64;
            EnvelopePoint {
                t_ms: s.t * 1000.0,
                envelope: ((prefix[hi + 1] - prefix[lo]) / count).max(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WaveformSample;

    fn wave(values: &[f64]) -> Waveform {
        Waveform {
            sample_rate_hz: 1000.0,
            samples: values
                .iter()
                .enumerate()
                .map(|(i, &amplitude)| WaveformSample {
                    t: i as f64 / 1000.0,
                    amplitude,
                })
                .collect(),
        }
    }

    #[test]
    fn test_rectifies_and_aligns() {
        let env = compute_envelope(&wave(&[-1.0, 1.0, -1.0, 1.0]), 1);
        assert_eq!(env.len(), 4);
        assert!(env.iter().all(|p| (p.envelope - 1.0).abs() < 1e-12));
        assert!((env[3].t_ms - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_window_is_clipped_not_padded() {
        // Index 0 with half-window 2 sees [0, 1, 2] -> (0 + 3 + 6) / 3
        let env = compute_envelope(&wave(&[0.0, 3.0, 6.0, 9.0, 12.0]), 2);
        assert!((env[0].envelope - 3.0).abs() < 1e-12);
        // Centre sees all five
        assert!((env[2].envelope - 6.0).abs() < 1e-12);
        // Last sees [2, 3, 4]
        assert!((env[4].envelope - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_wider_than_signal() {
        let env = compute_envelope(&wave(&[2.0, -4.0]), 20);
        assert!(env.iter().all(|p| (p.envelope - 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_zero_half_window_is_plain_rectification() {
        let values = [0.5, -0.25, 0.0, -2.0];
        let env = compute_envelope(&wave(&values), 0);
        for (p, v) in env.iter().zip(values) {
            assert!((p.envelope - v.abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty() {
        assert!(compute_envelope(&wave(&[]), 20).is_empty());
    }
}
