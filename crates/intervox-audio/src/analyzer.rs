use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CLIPPING_THRESHOLD;
use crate::frame::AudioFrame;

/// Per-frame features consumed by the voice-activity detector and the
/// quality scorer. Derived once per tick, then treated as immutable; both
/// consumers observe the identical snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameFeatures {
    /// Root-mean-square amplitude, in [0, 1].
    pub rms: f64,
    /// Largest absolute sample, in [0, 1].
    pub peak: f64,
    /// Samples at or above the clipping threshold.
    pub clip_count: u32,
}

/// Stateless feature extraction over one frame.
pub struct FrameAnalyzer {
    clipping_threshold: f64,
}

impl FrameAnalyzer {
    pub fn new(clipping_threshold: f64) -> Self {
        Self {
            clipping_threshold: clipping_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn clipping_threshold(&self) -> f64 {
        self.clipping_threshold
    }

    /// Reduce a frame to its feature snapshot.
    ///
    /// An empty frame violates the tick-driver contract. Debug builds fail
    /// fast on it; release builds skip the tick by returning silence
    /// features. That fallback is non-conforming input handling, not part of
    /// the contract.
    pub fn analyze(&self, frame: &AudioFrame) -> FrameFeatures {
        debug_assert!(!frame.is_empty(), "tick driver delivered an empty frame");
        if frame.is_empty() {
            return FrameFeatures::default();
        }

        let mut sum_squares = 0.0f64;
        let mut peak = 0.0f64;
        let mut clip_count = 0u32;

        for &sample in &frame.samples {
            let s = sample as f64;
            let magnitude = s.abs();
            sum_squares += s * s;
            if magnitude > peak {
                peak = magnitude;
            }
            if magnitude >= self.clipping_threshold {
                clip_count += 1;
            }
        }

        let rms = (sum_squares / frame.len() as f64).sqrt();

        FrameFeatures {
            rms: rms.min(1.0),
            peak: peak.min(1.0),
            clip_count,
        }
    }
}

impl Default for FrameAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_CLIPPING_THRESHOLD)
    }
}
