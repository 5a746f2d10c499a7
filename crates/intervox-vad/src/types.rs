/// Speech boundary events emitted by the detector.
///
/// Each fires exactly once per transition: `SpeechStart` on
/// candidate-to-active confirmation, `SpeechEnd` when the silence window
/// after confirmed speech elapses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VadEvent {
    SpeechStart {
        /// Milliseconds since the detector started listening.
        timestamp_ms: u64,
        /// Smoothed RMS at the moment of confirmation.
        smoothed_rms: f64,
    },
    SpeechEnd {
        timestamp_ms: u64,
        /// How long the speaker had already been silent when the segment
        /// closed; at least the configured silence threshold.
        silence_duration_s: f64,
    },
}

/// Per-tick volume reading for live meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeUpdate {
    pub smoothed_rms: f64,
    pub raw_rms: f64,
}

/// Everything one tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub volume: VolumeUpdate,
    pub event: Option<VadEvent>,
}

/// Running counters for one listening session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VadMetrics {
    pub frames_processed: u64,
    pub speech_segments: u64,
    pub total_speech_ms: u64,
    pub total_silence_ms: u64,
    pub last_rms: f64,
}
