//! Rotor Sentinel: vibration condition monitoring for rotating machinery
//!
//! Turns raw vibration captures and summary-metric histories into machine
//! health insights.
//!
//! ## Architecture
//!
//! - **Processing**: waveform synthesis, DFT spectrum, envelope, waveform summary
//! - **Analysis**: trend, health score, RUL and fault fingerprint from one history snapshot
//! - **Diagnostics**: machine-type classification, sub-scores, reference markers
//! - **Engine**: the context object that owns configuration and ties it together
//!
//! All computation is synchronous and stateless; periodic recomputation is
//! the caller's job (see the `watch` subcommand of the CLI).

pub mod alerts;
pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod fleet;
pub mod history;
pub mod ingest;
pub mod processing;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, EngineConfig};

// Re-export commonly used types
pub use types::{
    ConditionState, EnvelopePoint, FaultScores, MachineInsights, MachineType, MachineTypeProfile,
    MetricSample, RawMetricSample, SampleError, Severity, SpectralBin, TrendDirection, Waveform,
};

// Re-export the engine surface
pub use alerts::{Alert, AlertSeverity};
pub use analysis::{analyze_history, HistoryStats};
pub use engine::{ConditionEngine, MachineReport, SpectralView};
pub use fleet::{summarize_fleet, FleetSummary};
pub use ingest::{load_histories, IngestError, MetricRecord};
pub use processing::ProcessingError;
