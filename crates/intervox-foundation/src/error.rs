use thiserror::Error;

/// Errors surfaced when acquiring or driving an audio source.
///
/// These are reported once, synchronously, from `start()`. The pipeline never
/// retries internally; the presentation layer decides the fallback UX.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Capture device not found: {name:?}")]
    DeviceNotFound { name: Option<String> },
}

impl AudioError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }

    /// All variants describe an unavailable source; this distinguishes the
    /// ones the operator can fix without replugging hardware.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}
