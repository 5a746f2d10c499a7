//! Voice activity detection.
//!
//! A hysteresis state machine over exponentially smoothed frame RMS. Speech
//! is only confirmed after the smoothed level has stayed above the
//! sensitivity threshold for a minimum duration, and only ends after a full
//! silence window, so brief spikes and dips never flicker the recording
//! gate.

pub mod config;
pub mod detector;
pub mod state;
pub mod types;

pub use config::VadConfig;
pub use detector::VoiceActivityDetector;
pub use state::{SpeechState, SpeechStateMachine, SpeechTransition};
pub use types::{TickOutcome, VadEvent, VadMetrics, VolumeUpdate};
