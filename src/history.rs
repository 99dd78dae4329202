//! Synthetic fallback metric history
//!
//! When a collector has nothing for a machine yet, callers substitute a
//! plausible flat history so the dashboard still has insights to show. The
//! shape is deterministic per machine (base RMS keyed by the identifier's
//! digits); only the jitter is random.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::defaults::{
    FALLBACK_BASE_RMS, FALLBACK_CREST_MIN, FALLBACK_CREST_SPAN, FALLBACK_MIN_RMS, FALLBACK_RMS_STEP,
};
use crate::config::FallbackHistoryConfig;
use crate::diagnostics::NumericId;
use crate::types::MetricSample;

/// Status stamped on every synthetic sample.
pub const FALLBACK_STATUS: &str = "healthy";

/// `0.4 + (numeric_id mod 5)·0.1`
pub fn fallback_base_rms(machine_id: &str) -> f64 {
    let residue = NumericId::from_identifier(machine_id).residue(5);
    FALLBACK_BASE_RMS + f64::from(residue) * FALLBACK_RMS_STEP
}

fn offset_before(now: DateTime<Utc>, secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|offset| now.checked_sub_signed(offset))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Generate `config.points` samples spaced `config.interval_secs` apart,
/// the last one stamped `now`, in chronological order.
pub fn synthetic_history<R: Rng + ?Sized>(
    machine_id: &str,
    config: &FallbackHistoryConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<MetricSample> {
    let base = fallback_base_rms(machine_id);

    let samples: Vec<MetricSample> = (0..config.points)
        .map(|i| {
            let steps_back = (config.points - 1 - i) as u64;
            let timestamp = offset_before(now, config.interval_secs.saturating_mul(steps_back));
            let jitter = (rng.gen::<f64>() - 0.5) * config.jitter;
            let rms = (base + jitter).max(FALLBACK_MIN_RMS);
            let peak = rms * (FALLBACK_CREST_MIN + rng.gen::<f64>() * FALLBACK_CREST_SPAN);
            MetricSample::new(timestamp, rms, peak, peak / rms).with_status(FALLBACK_STATUS)
        })
        .collect();

    tracing::warn!(
        machine_id,
        points = samples.len(),
        base_rms = base,
        "No metric history, substituting synthetic fallback"
    );

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn test_base_rms_keyed_by_digits() {
        assert!((fallback_base_rms("machine_01") - 0.5).abs() < 1e-12);
        assert!((fallback_base_rms("machine_05") - 0.4).abs() < 1e-12);
        assert!((fallback_base_rms("machine_09") - 0.8).abs() < 1e-12);
        // no digits reads as 1
        assert!((fallback_base_rms("press") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_shape_and_spacing() {
        let config = FallbackHistoryConfig::default();
        let history = synthetic_history("machine_03", &config, now(), &mut StdRng::seed_from_u64(1));
        assert_eq!(history.len(), 60);
        assert_eq!(history.last().map(|s| s.timestamp), Some(now()));
        assert_eq!(history[0].timestamp, now() - Duration::minutes(59));
        assert!(history
            .windows(2)
            .all(|w| w[1].timestamp - w[0].timestamp == Duration::seconds(60)));
    }

    #[test]
    fn test_values_stay_in_band() {
        let config = FallbackHistoryConfig::default();
        let history = synthetic_history("machine_03", &config, now(), &mut StdRng::seed_from_u64(2));
        for s in &history {
            // base 0.7 ± 0.04
            assert!((0.66..=0.74).contains(&s.rms), "rms = {}", s.rms);
            assert!((1.4..=1.8).contains(&s.crest_factor), "crest = {}", s.crest_factor);
            assert!((s.peak - s.rms * s.crest_factor).abs() < 1e-12);
            assert_eq!(s.status, FALLBACK_STATUS);
        }
    }

    #[test]
    fn test_rms_floor() {
        let config = FallbackHistoryConfig {
            jitter: 2.0,
            ..FallbackHistoryConfig::default()
        };
        let history = synthetic_history("m0", &config, now(), &mut StdRng::seed_from_u64(3));
        assert!(history.iter().all(|s| s.rms >= 0.1));
    }

    #[test]
    fn test_zero_points() {
        let config = FallbackHistoryConfig {
            points: 0,
            ..FallbackHistoryConfig::default()
        };
        assert!(synthetic_history("m1", &config, now(), &mut StdRng::seed_from_u64(4)).is_empty());
    }
}
