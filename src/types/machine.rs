//! Machine-type classification and type-specific diagnostic types

use serde::{Deserialize, Serialize};

/// Machine family inferred from the machine identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MachineType {
    Motor,
    Gearbox,
    Pump,
    Fan,
    #[default]
    Unknown,
}

impl std::fmt::Display for MachineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineType::Motor => write!(f, "motor"),
            MachineType::Gearbox => write!(f, "gearbox"),
            MachineType::Pump => write!(f, "pump"),
            MachineType::Fan => write!(f, "fan"),
            MachineType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Electric-motor fault sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MotorFaults {
    pub rotor_bar: f64,
    pub air_gap_eccentricity: f64,
    pub stator_issue: f64,
    pub bearing: f64,
    pub misalignment: f64,
}

/// Gearbox fault sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GearboxFaults {
    pub gear_mesh: f64,
    pub gear_tooth: f64,
    pub hunting_tooth: f64,
    pub bearing: f64,
    pub misalignment: f64,
}

/// Type-specific sub-scores; only motors and gearboxes carry any.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeFaults {
    Motor(MotorFaults),
    Gearbox(GearboxFaults),
}

/// Spectral family a reference marker belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Rotational,
    LineFrequency,
    RotorBar,
    GearMesh,
    Sideband,
    BearingBand,
}

/// Reference frequency drawn over a spectrum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrequencyMarker {
    /// Hz
    pub frequency: f64,
    pub label: String,
    pub kind: MarkerKind,
}

impl FrequencyMarker {
    pub fn new(frequency: f64, label: impl Into<String>, kind: MarkerKind) -> Self {
        Self {
            frequency,
            label: label.into(),
            kind,
        }
    }
}

/// Machine-type projection of a fault fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineTypeProfile {
    pub machine_type: MachineType,
    pub type_faults: Option<TypeFaults>,
    pub frequency_markers: Vec<FrequencyMarker>,
    /// Human-readable advisories, threshold-gated on the sub-scores
    pub diagnostic_insights: Vec<String>,
}
