//! Machine-type diagnostics
//!
//! Projects a generic fault fingerprint onto a machine family:
//! - [`machine_type`]: family from the identifier (keywords, then digits)
//! - [`profile`]: motor / gearbox sub-scores, reference markers, advisories
//! - [`signature`]: synthetic family signature spectrum for previews

pub mod machine_type;
pub mod profile;
pub mod signature;

pub use machine_type::{classify_machine, NumericId};
pub use profile::{
    build_profile, diagnostic_insights, frequency_markers, gearbox_faults, motor_faults,
    spectrum_reference_markers,
};
pub use signature::signature_spectrum;
