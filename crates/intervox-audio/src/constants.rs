//! Shared constants for the analysis pipeline.

/// Default capture size handed to the analyzers each tick (samples).
pub const DEFAULT_FRAME_SIZE_SAMPLES: usize = 2048;

/// Default analysis tick interval (ms).
pub const DEFAULT_CHECK_INTERVAL_MS: u32 = 50;

/// Amplitude at or above which a sample counts as clipped.
pub const DEFAULT_CLIPPING_THRESHOLD: f64 = 0.98;

/// Fixed gain applied when mapping RMS to a 0..1 level-meter display.
/// Conversational speech RMS sits well below full scale, so the raw value
/// makes a nearly empty meter.
pub const VOLUME_DISPLAY_FACTOR: f64 = 5.0;
