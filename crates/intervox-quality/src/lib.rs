//! Session audio-quality monitoring.
//!
//! Accumulates per-frame features over a whole recording session into a
//! 0–100 composite score (penalties for clipping, quietness, loudness and
//! background noise) and emits rate-limited operator warnings.

pub mod config;
pub mod metrics;
pub mod scorer;
pub mod types;

pub use config::QualityThresholds;
pub use metrics::QualityMetrics;
pub use scorer::{QualityScorer, QualityUpdate};
pub use types::{QualityLevel, QualityStatus, VolumeState, Warning, WarningKind};
