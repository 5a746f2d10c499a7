use std::time::Instant;

use tracing::{debug, info};

use intervox_audio::constants::VOLUME_DISPLAY_FACTOR;
use intervox_audio::{AudioSource, FrameFeatures};
use intervox_foundation::clock::{real_clock, SharedClock};
use intervox_foundation::AudioError;

use crate::config::{
    VadConfig, SENSITIVITY_MAX, SENSITIVITY_MIN, SILENCE_THRESHOLD_MAX_S, SILENCE_THRESHOLD_MIN_S,
};
use crate::state::{SpeechStateMachine, SpeechTransition};
use crate::types::{TickOutcome, VadEvent, VadMetrics, VolumeUpdate};

/// Hysteresis voice-activity detector.
///
/// Consumes one [`FrameFeatures`] snapshot per tick while listening and
/// decides when the speaker has started and stopped talking. Time comes from
/// an injected monotonic [`SharedClock`] so the hysteresis windows are
/// deterministic under test.
pub struct VoiceActivityDetector {
    config: VadConfig,
    clock: SharedClock,
    machine: SpeechStateMachine,
    smoothed_rms: f64,
    listening: bool,
    started_at: Option<Instant>,
    metrics: VadMetrics,
}

impl VoiceActivityDetector {
    pub fn new(config: VadConfig) -> Self {
        Self::with_clock(config, real_clock())
    }

    /// Construct with an injected clock. The config is taken as given; the
    /// runtime tuning setters clamp, construction trusts the caller to stay
    /// within the documented ranges (or to call [`VadConfig::sanitized`]).
    pub fn with_clock(config: VadConfig, clock: SharedClock) -> Self {
        Self {
            machine: SpeechStateMachine::new(
                config.min_speech_duration(),
                config.silence_threshold(),
            ),
            config,
            clock,
            smoothed_rms: 0.0,
            listening: false,
            started_at: None,
            metrics: VadMetrics::default(),
        }
    }

    /// Begin a listening session.
    ///
    /// Acquires the external audio source and resets all per-session state.
    /// Calling while already listening is a no-op; acquisition failures are
    /// surfaced once and never retried here.
    pub fn start(&mut self, source: &mut dyn AudioSource) -> Result<(), AudioError> {
        if self.listening {
            return Ok(());
        }
        source.acquire()?;

        self.machine.reset();
        self.smoothed_rms = 0.0;
        self.metrics = VadMetrics::default();
        self.started_at = Some(self.clock.now());
        self.listening = true;
        info!(
            sensitivity = self.config.sensitivity,
            silence_threshold_s = self.config.silence_threshold_s,
            "voice activity detection started"
        );
        Ok(())
    }

    /// End the listening session. Idempotent; after this returns, no further
    /// tick produces an event.
    pub fn stop(&mut self) {
        if !self.listening {
            return;
        }
        self.listening = false;
        self.machine.reset();
        self.started_at = None;
        info!(
            frames = self.metrics.frames_processed,
            segments = self.metrics.speech_segments,
            "voice activity detection stopped"
        );
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Whether confirmed speech is currently in progress.
    pub fn is_detecting_speech(&self) -> bool {
        self.listening && self.machine.state().is_active()
    }

    /// Smoothed RMS scaled for a 0..1 level meter.
    pub fn current_volume(&self) -> f64 {
        (self.smoothed_rms * VOLUME_DISPLAY_FACTOR).clamp(0.0, 1.0)
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.config.sensitivity = sensitivity.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX);
    }

    pub fn set_silence_threshold(&mut self, seconds: f64) {
        self.config.silence_threshold_s =
            seconds.clamp(SILENCE_THRESHOLD_MIN_S, SILENCE_THRESHOLD_MAX_S);
        self.machine
            .set_silence_threshold(self.config.silence_threshold());
    }

    pub fn config(&self) -> VadConfig {
        self.config
    }

    pub fn metrics(&self) -> &VadMetrics {
        &self.metrics
    }

    /// Process one tick's features. Returns `None` while not listening.
    pub fn process(&mut self, features: &FrameFeatures) -> Option<TickOutcome> {
        if !self.listening {
            return None;
        }
        let now = self.clock.now();

        let alpha = self.config.smoothing_factor;
        self.smoothed_rms =
            (alpha * self.smoothed_rms + (1.0 - alpha) * features.rms).clamp(0.0, 1.0);
        let is_voice = self.smoothed_rms > self.config.sensitivity;

        let transition = self.machine.process(is_voice, now);
        let event = transition.map(|t| self.event_for(t, now));

        self.update_metrics(features, event.as_ref());

        Some(TickOutcome {
            volume: VolumeUpdate {
                smoothed_rms: self.smoothed_rms,
                raw_rms: features.rms,
            },
            event,
        })
    }

    fn event_for(&self, transition: SpeechTransition, now: Instant) -> VadEvent {
        let timestamp_ms = self
            .started_at
            .map(|start| now.duration_since(start).as_millis() as u64)
            .unwrap_or(0);
        match transition {
            SpeechTransition::Started => {
                debug!(timestamp_ms, smoothed_rms = self.smoothed_rms, "speech started");
                VadEvent::SpeechStart {
                    timestamp_ms,
                    smoothed_rms: self.smoothed_rms,
                }
            }
            SpeechTransition::Ended { silence } => {
                let silence_duration_s = silence.as_secs_f64();
                debug!(timestamp_ms, silence_duration_s, "speech ended");
                VadEvent::SpeechEnd {
                    timestamp_ms,
                    silence_duration_s,
                }
            }
        }
    }

    fn update_metrics(&mut self, features: &FrameFeatures, event: Option<&VadEvent>) {
        self.metrics.frames_processed += 1;
        self.metrics.last_rms = features.rms;

        let tick_ms = self.config.check_interval_ms as u64;
        if self.machine.state().is_active() {
            self.metrics.total_speech_ms += tick_ms;
        } else {
            self.metrics.total_silence_ms += tick_ms;
        }

        if let Some(VadEvent::SpeechStart { .. }) = event {
            self.metrics.speech_segments += 1;
        }
    }
}
