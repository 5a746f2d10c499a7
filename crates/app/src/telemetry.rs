use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared counters for monitoring the pipeline from another thread
/// (dashboard, status line) without touching the analyzers themselves.
#[derive(Clone, Default)]
pub struct PipelineMetrics {
    pub frames_processed: Arc<AtomicU64>,
    pub speech_events: Arc<AtomicU64>,
    pub quality_warnings: Arc<AtomicU64>,
    /// Smoothed RMS * 1000 for atomic storage.
    pub current_rms: Arc<AtomicU64>,
    /// Latest composite quality score.
    pub current_score: Arc<AtomicU64>,
    pub is_speaking: Arc<AtomicBool>,
    pub last_speech_time: Arc<RwLock<Option<Instant>>>,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&self) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_speech_event(&self, speaking: bool, now: Instant) {
        self.speech_events.fetch_add(1, Ordering::Relaxed);
        self.is_speaking.store(speaking, Ordering::Relaxed);
        if speaking {
            *self.last_speech_time.write() = Some(now);
        }
    }

    pub fn record_warning(&self) {
        self.quality_warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn update_rms(&self, rms: f64) {
        self.current_rms
            .store((rms * 1000.0) as u64, Ordering::Relaxed);
    }

    pub fn update_score(&self, score: u8) {
        self.current_score.store(score as u64, Ordering::Relaxed);
    }

    pub fn rms(&self) -> f64 {
        self.current_rms.load(Ordering::Relaxed) as f64 / 1000.0
    }

    pub fn score(&self) -> u8 {
        self.current_score.load(Ordering::Relaxed) as u8
    }
}
