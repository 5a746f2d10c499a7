use std::time::{Duration, Instant};

/// Cumulative statistics for one monitoring session.
///
/// Created fresh on `start()`, mutated once per tick while monitoring, and
/// frozen (`end_time` set) on `stop()`. Nothing here persists across
/// sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityMetrics {
    /// Running mean of frame RMS.
    pub avg_volume: f64,
    /// Frames contributing to `avg_volume`.
    pub volume_samples: u64,
    /// Largest frame peak seen this session.
    pub peak_volume: f64,
    /// Frames classified as clipping.
    pub clipping_events: u64,
    pub too_quiet_frames: u64,
    pub too_loud_frames: u64,
    pub total_frames: u64,
    /// Running mean RMS of frames that carried signal but sat below the
    /// quiet threshold; distinguishes background noise from true silence.
    pub noise_floor_avg: f64,
    /// Frames contributing to `noise_floor_avg`.
    pub noise_samples: u64,
    /// Composite score, 0–100.
    pub quality_score: u8,
    pub start_time: Instant,
    pub end_time: Option<Instant>,
}

impl QualityMetrics {
    pub fn new(now: Instant) -> Self {
        Self {
            avg_volume: 0.0,
            volume_samples: 0,
            peak_volume: 0.0,
            clipping_events: 0,
            too_quiet_frames: 0,
            too_loud_frames: 0,
            total_frames: 0,
            noise_floor_avg: 0.0,
            noise_samples: 0,
            quality_score: 100,
            start_time: now,
            end_time: None,
        }
    }

    /// Session duration so far, or the final duration once stopped.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.end_time
            .unwrap_or(now)
            .duration_since(self.start_time)
    }
}
