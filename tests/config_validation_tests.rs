//! Config Validation Tests
//!
//! Exercises the config layer on its own: typo detection on raw TOML,
//! range validation on parsed values, and file round trips.

use rotor_sentinel::config::validation::{
    known_config_keys, suggest_correction, validate_ranges, validate_unknown_keys,
};
use rotor_sentinel::{ConfigError, EngineConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_alert_limit_warns_with_suggestion() {
    let toml_str = r#"
[alerts]
rms_limt = 1.2
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("rms_limt"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("alerts.rms_limit"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[machine]
rpm = 1500.0
line_frequency_hz = 60.0
gear_ratio = 3.5

[synthesis]
sample_rate_hz = 4000.0
duration_secs = 0.5
imbalance_gain = 1.3
noise_scale = 0.05

[spectrum]
display_max_hz = 400.0
peak_count = 3

[envelope]
half_window = 10

[fallback_history]
points = 30
interval_secs = 120
jitter = 0.05

[alerts]
rms_limit = 1.5
peak_limit = 3.0
crest_factor_limit = 4.0
secondary_checks = true

[scheduler]
refresh_interval_secs = 10
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(
        warnings.is_empty(),
        "Valid config should produce 0 warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
}

#[test]
fn multiple_typos_all_warned() {
    let toml_str = r#"
[machine]
rmp = 1800.0

[envelope]
half_widow = 10
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 2, "Expected 2 warnings, got {}", warnings.len());
}

#[test]
fn empty_toml_produces_zero_warnings() {
    assert!(validate_unknown_keys("").is_empty());
}

#[test]
fn known_keys_set_is_complete() {
    let text = EngineConfig::default()
        .to_toml()
        .expect("Default config should serialize");
    let warnings = validate_unknown_keys(&text);
    assert!(
        warnings.is_empty(),
        "Default config serialization should produce 0 unknown-key warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
}

#[test]
fn suggest_correction_finds_close_match() {
    let known = known_config_keys();
    let s = suggest_correction("scheduler.refresh_intreval_secs", &known);
    assert_eq!(s.as_deref(), Some("scheduler.refresh_interval_secs"));
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn negative_rpm_is_error() {
    let mut config = EngineConfig::default();
    config.machine.rpm = -10.0;
    let (errors, _) = validate_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("machine.rpm")));
}

#[test]
fn zero_refresh_interval_is_error() {
    let mut config = EngineConfig::default();
    config.scheduler.refresh_interval_secs = 0;
    let (errors, _) = validate_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("refresh_interval_secs")));
}

#[test]
fn nan_alert_limit_is_error() {
    let mut config = EngineConfig::default();
    config.alerts.peak_limit = f64::NAN;
    let (errors, _) = validate_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("alerts.peak_limit")));
}

#[test]
fn simulator_imbalance_gain_is_in_calibrated_range() {
    let mut config = EngineConfig::default();
    config.synthesis.imbalance_gain = 1.5;
    let (errors, warnings) = validate_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn from_toml_str_rejects_invalid_values() {
    let result = EngineConfig::from_toml_str(
        r#"
[synthesis]
sample_rate_hz = 0.0
"#,
    );
    match result {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("sample_rate_hz")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unknown_keys_do_not_fail_loading() {
    let config = EngineConfig::from_toml_str(
        r#"
[bearing_geometry]
balls = 9

[envelope]
half_window = 5
"#,
    )
    .unwrap();
    assert_eq!(config.envelope.half_window, 5);
}

// ============================================================================
// File Round Trips
// ============================================================================

#[test]
fn save_and_reload_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rotor_sentinel.toml");

    let mut config = EngineConfig::default();
    config.machine.gear_ratio = 4.0;
    config.alerts.rms_limit = 0.9;
    config.save_to_file(&path).unwrap();

    let loaded = EngineConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.machine.gear_mesh_hz(), 120.0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        EngineConfig::load_from_file(&path),
        Err(ConfigError::Io(p, _)) if p == path
    ));
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[machine\nrpm = ").unwrap();

    let err = EngineConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(ref p, _) if *p == path));
    assert!(err.to_string().contains("broken.toml"));
}
