//! Synthetic machine-type signature spectrum
//!
//! A 0-500 Hz, 2 Hz-step spectrum with a small noise floor and peaks at the
//! family's reference frequencies, each peak weighted by the matching
//! sub-score. Used to preview what a motor or gearbox in this condition
//! would look like on an analyzer.

use rand::Rng;

use crate::config::defaults::{ROTOR_BAR_SIDEBAND_HIGH, ROTOR_BAR_SIDEBAND_LOW};
use crate::config::MachineConfig;
use crate::types::{GearboxFaults, MotorFaults, SpectralBin, TypeFaults};

const SIGNATURE_MAX_HZ: u32 = 500;
const SIGNATURE_STEP_HZ: usize = 2;
const NOISE_FLOOR: f64 = 0.05;
const NOISE_SPAN: f64 = 0.02;

/// Half-width of a harmonic peak
const PEAK_HALF_WIDTH_HZ: f64 = 2.0;
/// Half-width of a sideband peak
const SIDEBAND_HALF_WIDTH_HZ: f64 = 1.0;

fn near(f: f64, target: f64, half_width: f64) -> bool {
    (f - target).abs() < half_width
}

fn motor_amplitude(f: f64, m: &MotorFaults, machine: &MachineConfig) -> f64 {
    let rpm_hz = machine.rpm_hz();
    let line = machine.line_frequency_hz;
    let mut amp = 0.0;

    if near(f, rpm_hz, PEAK_HALF_WIDTH_HZ) {
        amp += 0.8 + m.rotor_bar * 0.5;
    }
    if near(f, 2.0 * rpm_hz, PEAK_HALF_WIDTH_HZ) {
        amp += 0.3 + m.air_gap_eccentricity * 0.4;
    }
    if near(f, line, PEAK_HALF_WIDTH_HZ) {
        amp += 0.2 + m.stator_issue * 0.3;
    }
    if near(f, rpm_hz * ROTOR_BAR_SIDEBAND_LOW, SIDEBAND_HALF_WIDTH_HZ)
        || near(f, rpm_hz * ROTOR_BAR_SIDEBAND_HIGH, SIDEBAND_HALF_WIDTH_HZ)
    {
        amp += m.rotor_bar * 0.4;
    }
    amp
}

fn gearbox_amplitude(f: f64, g: &GearboxFaults, machine: &MachineConfig) -> f64 {
    let rpm_hz = machine.rpm_hz();
    let mesh = machine.gear_mesh_hz();
    let mut amp = 0.0;

    if near(f, rpm_hz, PEAK_HALF_WIDTH_HZ) {
        amp += 0.4 + g.misalignment * 0.3;
    }
    if near(f, mesh, PEAK_HALF_WIDTH_HZ) {
        amp += 0.9 + g.gear_mesh * 0.6;
    }
    if near(f, 2.0 * mesh, PEAK_HALF_WIDTH_HZ) {
        amp += 0.3 + g.gear_tooth * 0.4;
    }
    if near(f, 3.0 * mesh, PEAK_HALF_WIDTH_HZ) {
        amp += 0.15 + g.gear_tooth * 0.2;
    }
    if near(f, mesh - rpm_hz, SIDEBAND_HALF_WIDTH_HZ) || near(f, mesh + rpm_hz, SIDEBAND_HALF_WIDTH_HZ) {
        amp += g.gear_tooth * 0.3;
    }
    amp
}

/// Build the signature spectrum for a machine family's sub-scores.
///
/// `None` (pump, fan, unknown) yields an empty spectrum.
pub fn signature_spectrum<R: Rng + ?Sized>(
    type_faults: Option<&TypeFaults>,
    machine: &MachineConfig,
    rng: &mut R,
) -> Vec<SpectralBin> {
    let Some(faults) = type_faults else {
        return Vec::new();
    };

    (0..=SIGNATURE_MAX_HZ)
        .step_by(SIGNATURE_STEP_HZ)
        .map(|hz| {
            let f = f64::from(hz);
            let noise = NOISE_FLOOR + rng.gen::<f64>() * NOISE_SPAN;
            let peaks = match faults {
                TypeFaults::Motor(m) => motor_amplitude(f, m, machine),
                TypeFaults::Gearbox(g) => gearbox_amplitude(f, g, machine),
            };
            SpectralBin {
                frequency: f,
                amplitude: (noise + peaks).max(0.0),
            }
        })
        .collect()
}
