//! Engine Configuration Module
//!
//! Operator-tunable parameters loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `ROTOR_SENTINEL_CONFIG` environment variable (path to TOML file)
//! 2. `rotor_sentinel.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! There is no process-wide config: load once and hand the value to the
//! [`ConditionEngine`](crate::engine::ConditionEngine) that owns it.
//!
//! ```ignore
//! let engine = ConditionEngine::new(EngineConfig::load());
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;
