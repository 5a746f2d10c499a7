use serde::{Deserialize, Serialize};
use std::time::Duration;

use intervox_audio::constants::DEFAULT_CHECK_INTERVAL_MS;

/// Clamp range for `sensitivity`.
pub const SENSITIVITY_MIN: f64 = 0.001;
pub const SENSITIVITY_MAX: f64 = 0.1;

/// Clamp range for `silence_threshold_s`.
pub const SILENCE_THRESHOLD_MIN_S: f64 = 0.5;
pub const SILENCE_THRESHOLD_MAX_S: f64 = 10.0;

/// Upper clamp for `smoothing_factor`; strictly below 1.0 so every new frame
/// still contributes to the average.
pub const SMOOTHING_FACTOR_MAX: f64 = 0.99;

/// Tuning knobs for the detector.
///
/// These are UX parameters, not safety-critical ones: out-of-range values are
/// silently clamped into their documented ranges rather than rejected, so a
/// tuning call can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VadConfig {
    /// Smoothed-RMS level above which a frame counts as voiced.
    /// Range [0.001, 0.1].
    pub sensitivity: f64,
    /// Silence required after speech before the segment ends, seconds.
    /// Range [0.5, 10].
    pub silence_threshold_s: f64,
    /// Sustained voice required before speech is confirmed, seconds.
    pub min_speech_duration_s: f64,
    /// Tick interval the driver is expected to honor, ms.
    pub check_interval_ms: u32,
    /// Exponential-moving-average weight on the previous smoothed RMS.
    /// Range [0, 1).
    pub smoothing_factor: f64,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.015,
            silence_threshold_s: 2.0,
            min_speech_duration_s: 0.3,
            check_interval_ms: DEFAULT_CHECK_INTERVAL_MS,
            smoothing_factor: 0.8,
        }
    }
}

impl VadConfig {
    /// Clamp every field into its documented range.
    pub fn sanitized(mut self) -> Self {
        self.sensitivity = self.sensitivity.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX);
        self.silence_threshold_s = self
            .silence_threshold_s
            .clamp(SILENCE_THRESHOLD_MIN_S, SILENCE_THRESHOLD_MAX_S);
        self.min_speech_duration_s = self.min_speech_duration_s.max(0.0);
        self.check_interval_ms = self.check_interval_ms.max(1);
        self.smoothing_factor = self.smoothing_factor.clamp(0.0, SMOOTHING_FACTOR_MAX);
        self
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms as u64)
    }

    pub fn silence_threshold(&self) -> Duration {
        Duration::from_secs_f64(self.silence_threshold_s)
    }

    pub fn min_speech_duration(&self) -> Duration {
        Duration::from_secs_f64(self.min_speech_duration_s)
    }

    /// Defaults overridden from `INTERVOX_*` environment variables.
    ///
    /// Supported: `INTERVOX_SENSITIVITY`, `INTERVOX_SILENCE_THRESHOLD_S`,
    /// `INTERVOX_MIN_SPEECH_DURATION_S`, `INTERVOX_SMOOTHING_FACTOR`,
    /// `INTERVOX_CHECK_INTERVAL_MS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_f64("INTERVOX_SENSITIVITY") {
            config.sensitivity = v;
        }
        if let Some(v) = env_f64("INTERVOX_SILENCE_THRESHOLD_S") {
            config.silence_threshold_s = v;
        }
        if let Some(v) = env_f64("INTERVOX_MIN_SPEECH_DURATION_S") {
            config.min_speech_duration_s = v;
        }
        if let Some(v) = env_f64("INTERVOX_SMOOTHING_FACTOR") {
            config.smoothing_factor = v;
        }
        if let Ok(raw) = std::env::var("INTERVOX_CHECK_INTERVAL_MS") {
            if let Ok(v) = raw.parse::<u32>() {
                config.check_interval_ms = v;
            }
        }

        config.sanitized()
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.parse().ok()
}
