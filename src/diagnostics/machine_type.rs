//! Machine family classification from an identifier string
//!
//! Keyword matches win. Identifiers without a keyword fall back to the
//! number formed by their digits, so `"asset-04"` and `"a0b4"` both read 4.
//! The digit string is never converted to an integer: only its residue and
//! parity are used, which keeps arbitrarily long identifiers safe.

use crate::types::MachineType;

/// Keyword table, checked in order against the lowercased identifier.
const KEYWORDS: &[(&str, MachineType)] = &[
    ("motor", MachineType::Motor),
    ("mtr", MachineType::Motor),
    ("gear", MachineType::Gearbox),
    ("gbx", MachineType::Gearbox),
    ("pump", MachineType::Pump),
    ("fan", MachineType::Fan),
];

/// Digits extracted from a machine identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericId {
    digits: String,
}

impl NumericId {
    /// Concatenate every ASCII digit of `id`; `"1"` when there are none.
    pub fn from_identifier(id: &str) -> Self {
        let digits: String = id.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            Self {
                digits: "1".to_string(),
            }
        } else {
            Self { digits }
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Value of the digit string modulo `modulus` (Horner's rule).
    ///
    /// The accumulator is widened to `u64`, so `acc * 10 + 9` fits for any
    /// `u32` modulus.
    pub fn residue(&self, modulus: u32) -> u32 {
        debug_assert!(modulus > 0);
        let modulus = u64::from(modulus);
        let value = self.digits.bytes().fold(0u64, |acc, b| {
            (acc * 10 + u64::from(b - b'0')) % modulus
        });
        // value < modulus <= u32::MAX
        u32::try_from(value).unwrap_or_default()
    }

    pub fn is_even(&self) -> bool {
        self.digits
            .bytes()
            .last()
            .map(|b| (b - b'0') % 2 == 0)
            .unwrap_or(false)
    }
}

/// Infer the machine family of `id`.
pub fn classify_machine(id: &str) -> MachineType {
    let lower = id.to_lowercase();
    if let Some(&(_, machine_type)) = KEYWORDS.iter().find(|(kw, _)| lower.contains(kw)) {
        return machine_type;
    }

    match NumericId::from_identifier(id).residue(3) {
        1 => MachineType::Gearbox,
        // 0 and 2 both land on motor
        _ => MachineType::Motor,
    }
}
