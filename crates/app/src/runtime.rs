use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use intervox_audio::{AudioSource, FrameAnalyzer};
use intervox_foundation::clock::SharedClock;
use intervox_foundation::AudioError;
use intervox_quality::{QualityScorer, QualityStatus, Warning};
use intervox_vad::{VadEvent, VoiceActivityDetector};

use crate::telemetry::PipelineMetrics;

/// Events delivered to the presentation layer, in tick order.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    SpeechStart {
        timestamp_ms: u64,
    },
    SpeechEnd {
        timestamp_ms: u64,
        silence_duration_s: f64,
    },
    VolumeChange {
        smoothed_rms: f64,
        raw_rms: f64,
    },
    QualityUpdate(QualityStatus),
    Warning(Warning),
}

/// The single tick abstraction the analyzers run under.
///
/// Owns the audio source and both stateful consumers. Each tick captures one
/// frame, extracts features once, and hands the identical immutable snapshot
/// to the detector and the scorer in that order; there is never more than
/// one frame in flight because the whole tick is synchronous. `stop()`
/// returns only after tick delivery has ceased, so no event can follow it.
pub struct TickDriver<S: AudioSource> {
    source: S,
    analyzer: FrameAnalyzer,
    vad: VoiceActivityDetector,
    scorer: QualityScorer,
    clock: SharedClock,
    interval: Duration,
    events: Sender<PipelineEvent>,
    metrics: PipelineMetrics,
    running: bool,
    ticks: u64,
}

impl<S: AudioSource> TickDriver<S> {
    pub fn new(
        source: S,
        vad: VoiceActivityDetector,
        scorer: QualityScorer,
        clock: SharedClock,
        metrics: PipelineMetrics,
    ) -> (Self, Receiver<PipelineEvent>) {
        let (events, receiver) = crossbeam_channel::unbounded();
        let driver = Self {
            analyzer: FrameAnalyzer::new(scorer.thresholds().clipping_threshold),
            interval: vad.config().check_interval(),
            source,
            vad,
            scorer,
            clock,
            events,
            metrics,
            running: false,
            ticks: 0,
        };
        (driver, receiver)
    }

    /// Acquire the source and start both analyzers.
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.running {
            return Ok(());
        }
        self.vad.start(&mut self.source)?;
        self.scorer.start(&mut self.source)?;
        self.running = true;
        self.ticks = 0;
        info!(interval_ms = self.interval.as_millis() as u64, "tick driver started");
        Ok(())
    }

    /// Stop tick delivery, shut both analyzers down and release the source.
    /// Idempotent; after this returns no further event is delivered.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.vad.stop();
        self.scorer.stop();
        self.source.release();
        info!(ticks = self.ticks, "tick driver stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_interval(&self) -> Duration {
        self.interval
    }

    pub fn vad(&self) -> &VoiceActivityDetector {
        &self.vad
    }

    /// Mutable detector access for live tuning (sensitivity, silence window).
    pub fn vad_mut(&mut self) -> &mut VoiceActivityDetector {
        &mut self.vad
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    /// Run exactly one tick: capture, analyze, dispatch. Does nothing once
    /// stopped.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        let frame = self.source.next_frame();
        let features = self.analyzer.analyze(&frame);
        self.ticks += 1;
        self.metrics.record_frame();

        if let Some(outcome) = self.vad.process(&features) {
            self.metrics.update_rms(outcome.volume.smoothed_rms);
            self.send(PipelineEvent::VolumeChange {
                smoothed_rms: outcome.volume.smoothed_rms,
                raw_rms: outcome.volume.raw_rms,
            });

            match outcome.event {
                Some(VadEvent::SpeechStart { timestamp_ms, .. }) => {
                    self.metrics.record_speech_event(true, self.clock.now());
                    self.send(PipelineEvent::SpeechStart { timestamp_ms });
                }
                Some(VadEvent::SpeechEnd {
                    timestamp_ms,
                    silence_duration_s,
                }) => {
                    self.metrics.record_speech_event(false, self.clock.now());
                    self.send(PipelineEvent::SpeechEnd {
                        timestamp_ms,
                        silence_duration_s,
                    });
                }
                None => {}
            }
        }

        if let Some(update) = self.scorer.process(&features) {
            self.metrics.update_score(update.status.score);
            self.send(PipelineEvent::QualityUpdate(update.status));
            if let Some(warning) = update.warning {
                self.metrics.record_warning();
                self.send(PipelineEvent::Warning(warning));
            }
        }

        if self.ticks % 1000 == 0 {
            debug!(
                ticks = self.ticks,
                speaking = self.vad.is_detecting_speech(),
                score = self.scorer.metrics().quality_score,
                "pipeline checkpoint"
            );
        }
    }

    /// Drive `n` ticks at the configured interval on this driver's clock.
    pub fn run_for_ticks(&mut self, n: u64) {
        for _ in 0..n {
            if !self.running {
                break;
            }
            self.tick();
            self.clock.sleep(self.interval);
        }
    }

    fn send(&self, event: PipelineEvent) {
        // The receiver side dropping just means nobody is presenting.
        let _ = self.events.send(event);
    }
}
