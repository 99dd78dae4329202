//! System-wide default constants.
//!
//! Scoring constants live here rather than in [`EngineConfig`](super::EngineConfig):
//! they define what a health score or fault score *means*, so they are not
//! operator-tunable. Grouped by subsystem for easy discovery.

// ============================================================================
// Machine kinematics
// ============================================================================

/// Nominal shaft speed (RPM). 1800 RPM = 30 Hz.
pub const NOMINAL_RPM: f64 = 1_800.0;

/// Mains frequency driving the motor (Hz).
pub const LINE_FREQUENCY_HZ: f64 = 50.0;

/// Gearbox reduction ratio used to place the gear-mesh marker.
pub const GEAR_RATIO: f64 = 5.0;

/// Slip sideband offsets around 1× RPM for rotor-bar markers.
pub const ROTOR_BAR_SIDEBAND_LOW: f64 = 0.95;
pub const ROTOR_BAR_SIDEBAND_HIGH: f64 = 1.05;

/// Shaft harmonics marked on every spectral view (multiples of 1× RPM).
pub const SPECTRUM_HARMONICS: [f64; 3] = [1.0, 2.0, 3.0];

/// Bearing defect bands (Hz). Fixed demonstration values, not derived from
/// bearing geometry.
pub const BEARING_BANDS_HZ: [(f64, &str); 4] =
    [(110.0, "BPFO"), (140.0, "BPFI"), (50.0, "BSF"), (15.0, "FTF")];

// ============================================================================
// Waveform synthesis
// ============================================================================

/// Rotational (1×) frequency used by the synthesizer (Hz).
pub const SYNTH_FUNDAMENTAL_HZ: f64 = 30.0;

/// Amplitude of the healthy 1× component.
pub const SYNTH_BASE_AMPLITUDE: f64 = 0.5;

/// Added 2× amplitude for misalignment.
pub const SYNTH_MISALIGNMENT_GAIN: f64 = 0.8;

/// Bearing impact carrier frequency (Hz) and amplitude.
pub const SYNTH_BEARING_CARRIER_HZ: f64 = 120.0;
pub const SYNTH_BEARING_GAIN: f64 = 0.3;

/// Bearing impact modulation frequency (Hz) and depth.
pub const SYNTH_BEARING_MOD_HZ: f64 = 5.0;
pub const SYNTH_BEARING_MOD_DEPTH: f64 = 0.5;

/// Accepted range for the imbalance 1× gain.
pub const IMBALANCE_GAIN_MIN: f64 = 1.2;
pub const IMBALANCE_GAIN_MAX: f64 = 1.5;

// ============================================================================
// Trend analysis / health scoring
// ============================================================================

/// Relative RMS change beyond which the trend is rising / falling.
pub const TREND_CHANGE_THRESHOLD: f64 = 0.15;

/// Absorbs float rounding in `(last - first) / first` so that a change of
/// exactly 15% (e.g. 0.40 -> 0.46) stays on the stable side.
pub const TREND_EPSILON: f64 = 1e-9;

/// Health points lost per unit of latest RMS.
pub const HEALTH_RMS_WEIGHT: f64 = 40.0;

/// Crest factor above which impulsive content starts costing health.
pub const CREST_FACTOR_BASELINE: f64 = 3.0;

/// Health points lost per unit of average crest factor above baseline.
pub const HEALTH_CREST_WEIGHT: f64 = 15.0;

/// RUL ladder: (inclusive minimum health score, hours). Checked top-down.
pub const RUL_LADDER: [(f64, u32); 4] = [(85.0, 720), (70.0, 360), (55.0, 168), (40.0, 72)];

/// RUL when the score is below every rung.
pub const RUL_FLOOR_HOURS: u32 = 24;

/// Health below this is Critical.
pub const SEVERITY_CRITICAL_BELOW: f64 = 50.0;

/// Health below this (and not Critical) is Warning.
pub const SEVERITY_WARNING_BELOW: f64 = 75.0;

// ============================================================================
// Fault fingerprint
// ============================================================================

/// Latest RMS at which imbalance saturates.
pub const IMBALANCE_RMS_FULL_SCALE: f64 = 1.5;

/// Crest factor excess (over baseline) at which bearing saturates.
pub const BEARING_CREST_FULL_SCALE: f64 = 2.0;

/// Misalignment score at zero RMS change.
pub const MISALIGNMENT_BIAS: f64 = 0.5;

/// Average RMS at which looseness saturates.
pub const LOOSENESS_RMS_FULL_SCALE: f64 = 2.0;

// ============================================================================
// Machine-type diagnostics
// ============================================================================

/// Sub-score above which a motor advisory is raised.
pub const MOTOR_ADVISORY_THRESHOLD: f64 = 0.5;

/// All motor sub-scores below this read as normal.
pub const MOTOR_NORMAL_BELOW: f64 = 0.3;

pub const GEAR_MESH_ADVISORY_THRESHOLD: f64 = 0.6;
pub const GEAR_TOOTH_ADVISORY_THRESHOLD: f64 = 0.5;
pub const HUNTING_TOOTH_ADVISORY_THRESHOLD: f64 = 0.4;

/// Gearbox normal band: mesh below 0.4, tooth and hunting below 0.3.
pub const GEAR_MESH_NORMAL_BELOW: f64 = 0.4;
pub const GEAR_TOOTH_NORMAL_BELOW: f64 = 0.3;
pub const HUNTING_TOOTH_NORMAL_BELOW: f64 = 0.3;

// ============================================================================
// Fallback history
// ============================================================================

/// Base RMS of synthetic history for numeric id 0 (mod 5).
pub const FALLBACK_BASE_RMS: f64 = 0.4;

/// Base RMS step per unit of `numeric_id mod 5`.
pub const FALLBACK_RMS_STEP: f64 = 0.1;

/// Synthetic RMS never drops below this.
pub const FALLBACK_MIN_RMS: f64 = 0.1;

/// Synthetic peak / rms range.
pub const FALLBACK_CREST_MIN: f64 = 1.4;
pub const FALLBACK_CREST_SPAN: f64 = 0.4;
