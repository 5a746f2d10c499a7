//! Pipeline plumbing around the analysis core.
//!
//! The core crates never touch a device or a timer; this crate owns the
//! tick driver that captures frames from an [`intervox_audio::AudioSource`],
//! runs feature extraction, feeds the detector and the scorer, and fans the
//! resulting events out to the presentation layer.

pub mod runtime;
pub mod sources;
pub mod telemetry;

pub use runtime::{PipelineEvent, TickDriver};
pub use telemetry::PipelineMetrics;
