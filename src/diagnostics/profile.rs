//! Machine-type fault profile: sub-scores, reference markers and advisories

use crate::analysis::clamp_unit;
use crate::config::defaults::{
    BEARING_BANDS_HZ, GEAR_MESH_ADVISORY_THRESHOLD, GEAR_MESH_NORMAL_BELOW, GEAR_TOOTH_ADVISORY_THRESHOLD,
    GEAR_TOOTH_NORMAL_BELOW, HUNTING_TOOTH_ADVISORY_THRESHOLD, HUNTING_TOOTH_NORMAL_BELOW,
    MOTOR_ADVISORY_THRESHOLD, MOTOR_NORMAL_BELOW, ROTOR_BAR_SIDEBAND_HIGH, ROTOR_BAR_SIDEBAND_LOW, SPECTRUM_HARMONICS,
};
use crate::config::MachineConfig;
use crate::types::{
    FaultScores, FrequencyMarker, GearboxFaults, MachineType, MachineTypeProfile, MarkerKind,
    MotorFaults, TypeFaults,
};

use super::machine_type::{classify_machine, NumericId};

// ============================================================================
// Sub-scores
// ============================================================================

pub fn motor_faults(scores: &FaultScores, id: &NumericId) -> MotorFaults {
    let risk = scores.overall_risk;
    let imbalance_boost = if scores.imbalance > 0.6 { 0.3 } else { 0.0 };
    let even_boost = if id.is_even() { 0.2 } else { 0.0 };

    MotorFaults {
        rotor_bar: clamp_unit(risk * 0.7 + imbalance_boost),
        air_gap_eccentricity: clamp_unit(scores.misalignment * 0.6 + scores.imbalance * 0.4),
        stator_issue: clamp_unit(risk * 0.5 + even_boost),
        bearing: scores.bearing,
        misalignment: scores.misalignment,
    }
}

pub fn gearbox_faults(scores: &FaultScores) -> GearboxFaults {
    let risk = scores.overall_risk;
    let bearing_boost = if scores.bearing > 0.5 { 0.3 } else { 0.0 };

    GearboxFaults {
        gear_mesh: clamp_unit(risk * 0.8),
        gear_tooth: clamp_unit(risk * 0.6 + bearing_boost),
        hunting_tooth: clamp_unit(risk * 0.4),
        bearing: scores.bearing,
        misalignment: scores.misalignment,
    }
}

// ============================================================================
// Reference markers
// ============================================================================

fn hz(freq: f64) -> String {
    if freq.fract() == 0.0 {
        format!("{freq:.0}Hz")
    } else {
        format!("{freq:.1}Hz")
    }
}

fn marker(frequency: f64, name: &str, kind: MarkerKind) -> FrequencyMarker {
    FrequencyMarker::new(frequency, format!("{name} ({})", hz(frequency)), kind)
}

/// Reference frequencies for a machine family. Empty for pump, fan and unknown.
pub fn frequency_markers(machine_type: MachineType, machine: &MachineConfig) -> Vec<FrequencyMarker> {
    let rpm_hz = machine.rpm_hz();
    let line = machine.line_frequency_hz;
    let mesh = machine.gear_mesh_hz();

    match machine_type {
        MachineType::Motor => vec![
            marker(rpm_hz, "1× RPM", MarkerKind::Rotational),
            marker(2.0 * rpm_hz, "2× RPM", MarkerKind::Rotational),
            marker(line, "Line", MarkerKind::LineFrequency),
            marker(2.0 * line, "2× Line", MarkerKind::LineFrequency),
            marker(rpm_hz * ROTOR_BAR_SIDEBAND_LOW, "Rotor Bar", MarkerKind::RotorBar),
            marker(rpm_hz * ROTOR_BAR_SIDEBAND_HIGH, "Rotor Bar", MarkerKind::RotorBar),
        ],
        MachineType::Gearbox => vec![
            marker(rpm_hz, "1× RPM", MarkerKind::Rotational),
            marker(2.0 * rpm_hz, "2× RPM", MarkerKind::Rotational),
            marker(mesh, "Gear Mesh", MarkerKind::GearMesh),
            marker(2.0 * mesh, "2× Mesh", MarkerKind::GearMesh),
            marker(3.0 * mesh, "3× Mesh", MarkerKind::GearMesh),
            marker(mesh - rpm_hz, "Sideband -", MarkerKind::Sideband),
            marker(mesh + rpm_hz, "Sideband +", MarkerKind::Sideband),
        ],
        MachineType::Pump | MachineType::Fan | MachineType::Unknown => Vec::new(),
    }
}

/// Shaft harmonics and bearing defect bands, independent of machine family.
pub fn spectrum_reference_markers(machine: &MachineConfig) -> Vec<FrequencyMarker> {
    let rpm_hz = machine.rpm_hz();
    let harmonics = SPECTRUM_HARMONICS
        .iter()
        .map(|&n| marker(n * rpm_hz, &format!("{n}× RPM"), MarkerKind::Rotational));
    let bands = BEARING_BANDS_HZ
        .iter()
        .map(|&(freq, name)| marker(freq, name, MarkerKind::BearingBand));
    harmonics.chain(bands).collect()
}

// ============================================================================
// Advisories
// ============================================================================

pub fn diagnostic_insights(faults: &TypeFaults) -> Vec<String> {
    let mut insights = Vec::new();

    match faults {
        TypeFaults::Motor(m) => {
            if m.rotor_bar > MOTOR_ADVISORY_THRESHOLD {
                insights.push(
                    "Elevated rotor bar fault indicators detected. Check for broken rotor bars or end-ring issues."
                        .to_string(),
                );
            }
            if m.air_gap_eccentricity > MOTOR_ADVISORY_THRESHOLD {
                insights.push(
                    "Air gap eccentricity present. Verify bearing condition and stator alignment."
                        .to_string(),
                );
            }
            if m.stator_issue > MOTOR_ADVISORY_THRESHOLD {
                insights.push(
                    "Line frequency harmonics suggest potential stator winding or core issues."
                        .to_string(),
                );
            }
            if m.rotor_bar < MOTOR_NORMAL_BELOW
                && m.air_gap_eccentricity < MOTOR_NORMAL_BELOW
                && m.stator_issue < MOTOR_NORMAL_BELOW
            {
                insights.push("Motor operating within normal parameters.".to_string());
            }
        }
        TypeFaults::Gearbox(g) => {
            if g.gear_mesh > GEAR_MESH_ADVISORY_THRESHOLD {
                insights.push(
                    "Elevated gear mesh frequency amplitude. Inspect gear teeth for wear or damage."
                        .to_string(),
                );
            }
            if g.gear_tooth > GEAR_TOOTH_ADVISORY_THRESHOLD {
                insights.push(
                    "Gear tooth fault indicators detected. Check for chipped, cracked, or worn gear teeth."
                        .to_string(),
                );
            }
            if g.hunting_tooth > HUNTING_TOOTH_ADVISORY_THRESHOLD {
                insights.push(
                    "Hunting tooth frequency present. Verify gear alignment and backlash settings."
                        .to_string(),
                );
            }
            if g.gear_mesh < GEAR_MESH_NORMAL_BELOW
                && g.gear_tooth < GEAR_TOOTH_NORMAL_BELOW
                && g.hunting_tooth < HUNTING_TOOTH_NORMAL_BELOW
            {
                insights.push("Gearbox operating within normal parameters.".to_string());
            }
        }
    }

    insights
}

// ============================================================================
// Profile
// ============================================================================

/// Classify `machine_id` and project `scores` onto its machine family.
pub fn build_profile(
    machine_id: &str,
    scores: &FaultScores,
    machine: &MachineConfig,
) -> MachineTypeProfile {
    let machine_type = classify_machine(machine_id);
    let id = NumericId::from_identifier(machine_id);

    let type_faults = match machine_type {
        MachineType::Motor => Some(TypeFaults::Motor(motor_faults(scores, &id))),
        MachineType::Gearbox => Some(TypeFaults::Gearbox(gearbox_faults(scores))),
        MachineType::Pump | MachineType::Fan | MachineType::Unknown => None,
    };

    let diagnostic_insights = type_faults.as_ref().map(diagnostic_insights).unwrap_or_default();

    tracing::debug!(
        machine_id,
        machine_type = %machine_type,
        insights = diagnostic_insights.len(),
        "Built machine-type profile"
    );

    MachineTypeProfile {
        machine_type,
        type_faults,
        frequency_markers: frequency_markers(machine_type, machine),
        diagnostic_insights,
    }
}
