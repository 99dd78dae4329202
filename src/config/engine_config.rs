//! Engine Configuration - operator-tunable TOML values
//!
//! Covers the signal path (synthesis, spectrum, envelope), the fallback
//! history generator, alert limits and the recomputation cadence. Each struct
//! implements `Default` with the values the engine ships with, so a missing
//! file or a partial file behaves exactly like the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "ROTOR_SENTINEL_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "rotor_sentinel.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$ROTOR_SENTINEL_CONFIG`
/// 2. `./rotor_sentinel.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Nominal machine kinematics for frequency markers
    #[serde(default)]
    pub machine: MachineConfig,

    /// Waveform synthesizer parameters
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Spectrum display parameters
    #[serde(default)]
    pub spectrum: SpectrumConfig,

    /// Envelope smoothing
    #[serde(default)]
    pub envelope: EnvelopeConfig,

    /// Synthetic history used when a machine has no metrics
    #[serde(default)]
    pub fallback_history: FallbackHistoryConfig,

    /// Per-sample threshold alert limits
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Recomputation cadence for the watch loop
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ROTOR_SENTINEL_CONFIG` environment variable
    /// 2. `./rotor_sentinel.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded engine config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./rotor_sentinel.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded engine config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Validate value ranges. Suspicious-but-usable values are logged;
    /// impossible ones fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Machine
// ============================================================================

/// Nominal kinematics used to place reference frequency markers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineConfig {
    /// Shaft speed (RPM)
    #[serde(default = "default_rpm")]
    pub rpm: f64,

    /// Supply line frequency (Hz)
    #[serde(default = "default_line_frequency")]
    pub line_frequency_hz: f64,

    /// Gearbox reduction ratio (mesh = ratio × shaft frequency)
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f64,
}

fn default_rpm() -> f64 {
    defaults::NOMINAL_RPM
}
fn default_line_frequency() -> f64 {
    defaults::LINE_FREQUENCY_HZ
}
fn default_gear_ratio() -> f64 {
    defaults::GEAR_RATIO
}

impl MachineConfig {
    /// Shaft frequency (Hz)
    pub fn rpm_hz(&self) -> f64 {
        self.rpm / 60.0
    }

    /// Gear mesh frequency (Hz)
    pub fn gear_mesh_hz(&self) -> f64 {
        self.rpm_hz() * self.gear_ratio
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            rpm: default_rpm(),
            line_frequency_hz: default_line_frequency(),
            gear_ratio: default_gear_ratio(),
        }
    }
}

// ============================================================================
// Synthesis
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisConfig {
    /// Sampling rate of synthesized waveforms (Hz)
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: f64,

    /// Capture length (seconds)
    #[serde(default = "default_duration")]
    pub duration_secs: f64,

    /// Added 1× amplitude for the imbalance state (1.2 - 1.5)
    #[serde(default = "default_imbalance_gain")]
    pub imbalance_gain: f64,

    /// Standard deviation of the additive Gaussian noise
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
}

fn default_sample_rate() -> f64 {
    2_000.0
}
fn default_duration() -> f64 {
    1.0
}
fn default_imbalance_gain() -> f64 {
    defaults::IMBALANCE_GAIN_MIN
}
fn default_noise_scale() -> f64 {
    0.1
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: default_sample_rate(),
            duration_secs: default_duration(),
            imbalance_gain: default_imbalance_gain(),
            noise_scale: default_noise_scale(),
        }
    }
}

// ============================================================================
// Spectrum / Envelope
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpectrumConfig {
    /// Highest frequency kept for display (Hz)
    #[serde(default = "default_display_max")]
    pub display_max_hz: f64,

    /// Number of dominant peaks reported
    #[serde(default = "default_peak_count")]
    pub peak_count: usize,
}

fn default_display_max() -> f64 {
    500.0
}
fn default_peak_count() -> usize {
    5
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            display_max_hz: default_display_max(),
            peak_count: default_peak_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeConfig {
    /// Samples on each side of the moving-average centre
    #[serde(default = "default_half_window")]
    pub half_window: usize,
}

fn default_half_window() -> usize {
    20
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            half_window: default_half_window(),
        }
    }
}

// ============================================================================
// Fallback History
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FallbackHistoryConfig {
    /// Number of synthetic samples
    #[serde(default = "default_points")]
    pub points: usize,

    /// Spacing between samples (seconds)
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Peak-to-peak width of the uniform RMS jitter
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

fn default_points() -> usize {
    60
}
fn default_interval() -> u64 {
    60
}
fn default_jitter() -> f64 {
    0.08
}

impl Default for FallbackHistoryConfig {
    fn default() -> Self {
        Self {
            points: default_points(),
            interval_secs: default_interval(),
            jitter: default_jitter(),
        }
    }
}

// ============================================================================
// Alerts / Scheduler
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertConfig {
    #[serde(default = "default_rms_limit")]
    pub rms_limit: f64,

    #[serde(default = "default_peak_limit")]
    pub peak_limit: f64,

    #[serde(default = "default_crest_limit")]
    pub crest_factor_limit: f64,

    /// Also alert on peak and crest factor (MEDIUM). Off: RMS only.
    #[serde(default)]
    pub secondary_checks: bool,
}

fn default_rms_limit() -> f64 {
    1.0
}
fn default_peak_limit() -> f64 {
    2.0
}
fn default_crest_limit() -> f64 {
    3.0
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            rms_limit: default_rms_limit(),
            peak_limit: default_peak_limit(),
            crest_factor_limit: default_crest_limit(),
            secondary_checks: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulerConfig {
    /// Seconds between recomputations in watch mode
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_refresh_interval() -> u64 {
    5
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}
