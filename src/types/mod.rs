//! Shared data structures for vibration condition monitoring
//!
//! - Waveform path: ConditionState, Waveform, SpectralBin, EnvelopePoint
//! - Metric path: MetricSample (validated) and RawMetricSample (collector shape)
//! - Outputs: FaultScores, MachineInsights, MachineTypeProfile

mod waveform;
mod metrics;
mod insights;
mod machine;

pub use waveform::*;
pub use metrics::*;
pub use insights::*;
pub use machine::*;
