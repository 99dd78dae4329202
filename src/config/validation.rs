//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::defaults::{IMBALANCE_GAIN_MAX, IMBALANCE_GAIN_MIN};
use super::EngineConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for EngineConfig.
///
/// Maintained by hand to match engine_config.rs; new fields go here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [machine]
        "machine",
        "machine.rpm",
        "machine.line_frequency_hz",
        "machine.gear_ratio",
        // [synthesis]
        "synthesis",
        "synthesis.sample_rate_hz",
        "synthesis.duration_secs",
        "synthesis.imbalance_gain",
        "synthesis.noise_scale",
        // [spectrum]
        "spectrum",
        "spectrum.display_max_hz",
        "spectrum.peak_count",
        // [envelope]
        "envelope",
        "envelope.half_window",
        // [fallback_history]
        "fallback_history",
        "fallback_history.points",
        "fallback_history.interval_secs",
        "fallback_history.jitter",
        // [alerts]
        "alerts",
        "alerts.rms_limit",
        "alerts.peak_limit",
        "alerts.crest_factor_limit",
        "alerts.secondary_checks",
        // [scheduler]
        "scheduler",
        "scheduler.refresh_interval_secs",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed EngineConfig.
///
/// Returns (errors, warnings). Errors are values the engine cannot run with;
/// warnings are usable but outside the range the scoring was tuned for.
pub fn validate_ranges(config: &EngineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let s = &config.synthesis;
    if !s.sample_rate_hz.is_finite() || s.sample_rate_hz <= 0.0 {
        errors.push(format!(
            "synthesis.sample_rate_hz = {} must be finite and > 0",
            s.sample_rate_hz
        ));
    }
    if !s.duration_secs.is_finite() || s.duration_secs < 0.0 {
        errors.push(format!(
            "synthesis.duration_secs = {} must be finite and >= 0",
            s.duration_secs
        ));
    }
    if !s.noise_scale.is_finite() || s.noise_scale < 0.0 {
        errors.push(format!(
            "synthesis.noise_scale = {} must be finite and >= 0",
            s.noise_scale
        ));
    }
    if !(IMBALANCE_GAIN_MIN..=IMBALANCE_GAIN_MAX).contains(&s.imbalance_gain) {
        warnings.push(ValidationWarning {
            field: "synthesis.imbalance_gain".to_string(),
            message: format!(
                "imbalance_gain = {:.2} is outside the calibrated range ({IMBALANCE_GAIN_MIN}-{IMBALANCE_GAIN_MAX})",
                s.imbalance_gain
            ),
            suggestion: None,
        });
    }

    // Nyquist: a display band above fs/2 just shows nothing extra
    let nyquist = s.sample_rate_hz / 2.0;
    let sp = &config.spectrum;
    if !sp.display_max_hz.is_finite() || sp.display_max_hz <= 0.0 {
        errors.push(format!(
            "spectrum.display_max_hz = {} must be finite and > 0",
            sp.display_max_hz
        ));
    } else if sp.display_max_hz > nyquist && nyquist > 0.0 {
        warnings.push(ValidationWarning {
            field: "spectrum.display_max_hz".to_string(),
            message: format!(
                "display_max_hz = {:.1} exceeds Nyquist ({:.1} Hz) for the configured sample rate",
                sp.display_max_hz, nyquist
            ),
            suggestion: None,
        });
    }

    let m = &config.machine;
    for (name, value) in [
        ("machine.rpm", m.rpm),
        ("machine.line_frequency_hz", m.line_frequency_hz),
        ("machine.gear_ratio", m.gear_ratio),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} = {value} must be finite and > 0"));
        }
    }

    let h = &config.fallback_history;
    if h.points == 0 {
        errors.push("fallback_history.points must be > 0".to_string());
    }
    if !h.jitter.is_finite() || h.jitter < 0.0 {
        errors.push(format!(
            "fallback_history.jitter = {} must be finite and >= 0",
            h.jitter
        ));
    }

    let a = &config.alerts;
    for (name, value) in [
        ("alerts.rms_limit", a.rms_limit),
        ("alerts.peak_limit", a.peak_limit),
        ("alerts.crest_factor_limit", a.crest_factor_limit),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} = {value} must be finite and > 0"));
        }
    }

    if config.scheduler.refresh_interval_secs == 0 {
        errors.push("scheduler.refresh_interval_secs must be >= 1".to_string());
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
