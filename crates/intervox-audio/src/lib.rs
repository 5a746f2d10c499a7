//! Audio frames and stateless per-frame feature extraction.
//!
//! The pipeline never owns a microphone handle. An external collaborator (the
//! tick driver) captures audio and hands each tick's samples in as an
//! [`AudioFrame`]; [`FrameAnalyzer`] reduces the frame to the
//! [`FrameFeatures`] snapshot that both the voice-activity detector and the
//! quality scorer consume within the same tick.

pub mod analyzer;
pub mod constants;
pub mod frame;
pub mod source;

pub use analyzer::{FrameAnalyzer, FrameFeatures};
pub use constants::{
    DEFAULT_CHECK_INTERVAL_MS, DEFAULT_CLIPPING_THRESHOLD, DEFAULT_FRAME_SIZE_SAMPLES,
    VOLUME_DISPLAY_FACTOR,
};
pub use frame::AudioFrame;
pub use source::{AudioSource, SilenceSource, UnavailableSource};
