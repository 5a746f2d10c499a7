use serde::{Deserialize, Serialize};
use std::time::Duration;

use intervox_audio::constants::DEFAULT_CLIPPING_THRESHOLD;

/// Frames with more clipped samples than this count as clipping. A handful
/// of clipped samples per frame is a transient spike, not distortion.
pub const CLIPPING_FRAME_THRESHOLD: u32 = 5;

/// Minimum time between warnings of the same kind.
pub const WARNING_COOLDOWN: Duration = Duration::from_secs(3);

/// Level thresholds for quality classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// RMS below this is too quiet.
    pub volume_min: f64,
    /// RMS above this is too loud.
    pub volume_max: f64,
    /// Target speaking level for the operator display.
    pub volume_ideal: f64,
    /// Expected background level in a reasonable room.
    pub noise_floor: f64,
    /// Sample amplitude at or above which a sample counts as clipped.
    pub clipping_threshold: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            volume_min: 0.05,
            volume_max: 0.95,
            volume_ideal: 0.3,
            noise_floor: 0.02,
            clipping_threshold: DEFAULT_CLIPPING_THRESHOLD,
        }
    }
}

impl QualityThresholds {
    /// Clamp everything into [0, 1] and keep `volume_min <= volume_max`.
    pub fn sanitized(mut self) -> Self {
        self.volume_max = self.volume_max.clamp(0.0, 1.0);
        self.volume_min = self.volume_min.clamp(0.0, self.volume_max);
        self.volume_ideal = self.volume_ideal.clamp(0.0, 1.0);
        self.noise_floor = self.noise_floor.clamp(0.0, 1.0);
        self.clipping_threshold = self.clipping_threshold.clamp(0.0, 1.0);
        self
    }

    /// Defaults overridden from `INTERVOX_*` environment variables.
    ///
    /// Supported: `INTERVOX_VOLUME_MIN`, `INTERVOX_VOLUME_MAX`,
    /// `INTERVOX_VOLUME_IDEAL`, `INTERVOX_NOISE_FLOOR`,
    /// `INTERVOX_CLIPPING_THRESHOLD`.
    pub fn from_env() -> Self {
        let mut thresholds = Self::default();

        if let Some(v) = env_f64("INTERVOX_VOLUME_MIN") {
            thresholds.volume_min = v;
        }
        if let Some(v) = env_f64("INTERVOX_VOLUME_MAX") {
            thresholds.volume_max = v;
        }
        if let Some(v) = env_f64("INTERVOX_VOLUME_IDEAL") {
            thresholds.volume_ideal = v;
        }
        if let Some(v) = env_f64("INTERVOX_NOISE_FLOOR") {
            thresholds.noise_floor = v;
        }
        if let Some(v) = env_f64("INTERVOX_CLIPPING_THRESHOLD") {
            thresholds.clipping_threshold = v;
        }

        thresholds.sanitized()
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.parse().ok()
}
