use crate::constants::DEFAULT_FRAME_SIZE_SAMPLES;
use crate::frame::AudioFrame;
use intervox_foundation::AudioError;

/// The capture seam. Device acquisition lives entirely behind this trait;
/// the analysis core only ever sees numeric frame buffers.
///
/// Contract for implementors:
/// - `acquire` is idempotent: a second call while already acquired succeeds
///   without side effects.
/// - `next_frame` is called at most once per tick, and never after `release`.
/// - `release` is idempotent and always succeeds.
pub trait AudioSource {
    fn acquire(&mut self) -> Result<(), AudioError>;
    fn next_frame(&mut self) -> AudioFrame;
    fn release(&mut self);
}

/// Source producing all-zero frames. Useful for tests and dry runs.
pub struct SilenceSource {
    frame_size: usize,
    interval_ms: u64,
    acquired: bool,
    frames_emitted: u64,
}

impl SilenceSource {
    pub fn new(frame_size: usize, interval_ms: u64) -> Self {
        Self {
            frame_size,
            interval_ms,
            acquired: false,
            frames_emitted: 0,
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }
}

impl Default for SilenceSource {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_SIZE_SAMPLES, 50)
    }
}

impl AudioSource for SilenceSource {
    fn acquire(&mut self) -> Result<(), AudioError> {
        self.acquired = true;
        Ok(())
    }

    fn next_frame(&mut self) -> AudioFrame {
        let timestamp_ms = self.frames_emitted * self.interval_ms;
        self.frames_emitted += 1;
        AudioFrame::new(vec![0.0; self.frame_size], timestamp_ms)
    }

    fn release(&mut self) {
        self.acquired = false;
    }
}

/// Source that always refuses acquisition, standing in for a missing device
/// or a denied microphone permission.
pub struct UnavailableSource {
    error: fn() -> AudioError,
}

impl UnavailableSource {
    pub fn permission_denied() -> Self {
        Self {
            error: || AudioError::PermissionDenied,
        }
    }

    pub fn missing_device() -> Self {
        Self {
            error: || AudioError::DeviceNotFound { name: None },
        }
    }
}

impl AudioSource for UnavailableSource {
    fn acquire(&mut self) -> Result<(), AudioError> {
        Err((self.error)())
    }

    fn next_frame(&mut self) -> AudioFrame {
        unreachable!("next_frame on a source that never acquires")
    }

    fn release(&mut self) {}
}
