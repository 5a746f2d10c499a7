use std::time::Instant;

use tracing::{debug, info, warn};

use intervox_audio::constants::VOLUME_DISPLAY_FACTOR;
use intervox_audio::{AudioSource, FrameFeatures};
use intervox_foundation::clock::{real_clock, SharedClock};
use intervox_foundation::AudioError;

use crate::config::{QualityThresholds, CLIPPING_FRAME_THRESHOLD, WARNING_COOLDOWN};
use crate::metrics::QualityMetrics;
use crate::types::{QualityLevel, QualityStatus, VolumeState, Warning, WarningKind};

/// Fixed-size cooldown table, one slot per [`WarningKind`].
struct WarningCooldowns {
    last_fired: [Option<Instant>; WarningKind::ALL.len()],
}

impl WarningCooldowns {
    fn new() -> Self {
        Self {
            last_fired: [None; WarningKind::ALL.len()],
        }
    }

    /// True if the kind's cooldown window has elapsed; records the firing.
    fn should_fire(&mut self, kind: WarningKind, now: Instant) -> bool {
        let slot = &mut self.last_fired[kind.index()];
        match *slot {
            Some(last) if now.duration_since(last) < WARNING_COOLDOWN => false,
            _ => {
                *slot = Some(now);
                true
            }
        }
    }
}

/// What one tick of quality monitoring produced.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityUpdate {
    pub status: QualityStatus,
    pub warning: Option<Warning>,
}

/// Session-long quality accumulator.
///
/// Consumes the same per-tick [`FrameFeatures`] snapshot as the VAD and
/// maintains cumulative [`QualityMetrics`], recomputing the composite score
/// every tick from ratios over the whole session.
pub struct QualityScorer {
    thresholds: QualityThresholds,
    clock: SharedClock,
    monitoring: bool,
    metrics: QualityMetrics,
    cooldowns: WarningCooldowns,
    last_rms: f64,
    last_peak: f64,
    last_clipping: bool,
}

impl QualityScorer {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self::with_clock(thresholds, real_clock())
    }

    pub fn with_clock(thresholds: QualityThresholds, clock: SharedClock) -> Self {
        let metrics = QualityMetrics::new(clock.now());
        Self {
            thresholds,
            clock,
            monitoring: false,
            metrics,
            cooldowns: WarningCooldowns::new(),
            last_rms: 0.0,
            last_peak: 0.0,
            last_clipping: false,
        }
    }

    /// Begin a monitoring session. Same lifecycle contract as the VAD:
    /// idempotent while monitoring, acquisition errors surfaced once.
    pub fn start(&mut self, source: &mut dyn AudioSource) -> Result<(), AudioError> {
        if self.monitoring {
            return Ok(());
        }
        source.acquire()?;

        self.metrics = QualityMetrics::new(self.clock.now());
        self.cooldowns = WarningCooldowns::new();
        self.last_rms = 0.0;
        self.last_peak = 0.0;
        self.last_clipping = false;
        self.monitoring = true;
        info!("quality monitoring started");
        Ok(())
    }

    /// Freeze the session. Idempotent; metrics stop accumulating and
    /// `elapsed` stops growing.
    pub fn stop(&mut self) {
        if !self.monitoring {
            return;
        }
        self.monitoring = false;
        self.metrics.end_time = Some(self.clock.now());
        info!(
            frames = self.metrics.total_frames,
            score = self.metrics.quality_score,
            "quality monitoring stopped"
        );
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    pub fn thresholds(&self) -> QualityThresholds {
        self.thresholds
    }

    /// Snapshot of the cumulative session metrics.
    pub fn metrics(&self) -> QualityMetrics {
        self.metrics
    }

    /// Session duration so far (frozen once stopped).
    pub fn elapsed(&self) -> std::time::Duration {
        self.metrics.elapsed(self.clock.now())
    }

    /// Derived snapshot for the live display.
    pub fn quality_status(&self) -> QualityStatus {
        let volume_state = if self.last_rms < self.thresholds.volume_min {
            VolumeState::Quiet
        } else if self.last_rms > self.thresholds.volume_max || self.last_clipping {
            VolumeState::Loud
        } else {
            VolumeState::Normal
        };

        QualityStatus {
            level: QualityLevel::from_score(self.metrics.quality_score),
            score: self.metrics.quality_score,
            volume_display: (self.last_rms * VOLUME_DISPLAY_FACTOR).clamp(0.0, 1.0),
            peak: self.last_peak,
            volume_state,
            is_clipping: self.last_clipping,
        }
    }

    /// Process one tick's features. Returns `None` while not monitoring.
    pub fn process(&mut self, features: &FrameFeatures) -> Option<QualityUpdate> {
        if !self.monitoring {
            return None;
        }
        let now = self.clock.now();
        let t = self.thresholds;
        let m = &mut self.metrics;

        m.total_frames += 1;
        m.avg_volume += (features.rms - m.avg_volume) / (m.volume_samples + 1) as f64;
        m.volume_samples += 1;
        m.peak_volume = m.peak_volume.max(features.peak);

        let is_clipping = features.clip_count > CLIPPING_FRAME_THRESHOLD;
        if is_clipping {
            m.clipping_events += 1;
        }
        if features.rms < t.volume_min {
            m.too_quiet_frames += 1;
        }
        if features.rms > t.volume_max {
            m.too_loud_frames += 1;
        }
        // Quiet frames that still carry signal estimate the background noise
        // floor; true silence is excluded.
        if features.rms > 0.0 && features.rms < t.volume_min {
            m.noise_floor_avg += (features.rms - m.noise_floor_avg) / (m.noise_samples + 1) as f64;
            m.noise_samples += 1;
        }

        m.quality_score = Self::compute_score(m, &t);

        self.last_rms = features.rms;
        self.last_peak = features.peak;
        self.last_clipping = is_clipping;

        if m.total_frames % 1000 == 0 {
            debug!(
                frames = m.total_frames,
                score = m.quality_score,
                avg_volume = m.avg_volume,
                "quality checkpoint"
            );
        }

        let status = self.quality_status();
        let warning = self.check_warning(features.rms, is_clipping, now);

        Some(QualityUpdate { status, warning })
    }

    /// Composite score from cumulative ratios, each penalty capped so a
    /// single failure mode cannot zero an otherwise fine session.
    fn compute_score(metrics: &QualityMetrics, thresholds: &QualityThresholds) -> u8 {
        let n = metrics.total_frames;
        if n == 0 {
            return 100;
        }
        let n = n as f64;

        let clipping_penalty = (metrics.clipping_events as f64 / n * 1000.0).min(30.0);
        let quiet_penalty = (metrics.too_quiet_frames as f64 / n * 50.0).min(25.0);
        let loud_penalty = (metrics.too_loud_frames as f64 / n * 100.0).min(20.0);
        let noise_penalty = if thresholds.volume_min > 0.0 {
            (metrics.noise_floor_avg / thresholds.volume_min * 10.0).min(15.0)
        } else {
            0.0
        };

        let score = 100.0 - clipping_penalty - quiet_penalty - loud_penalty - noise_penalty;
        score.clamp(0.0, 100.0).round() as u8
    }

    /// At most one warning per tick; clipping outranks level problems. Each
    /// kind has its own cooldown slot.
    fn check_warning(&mut self, rms: f64, is_clipping: bool, now: Instant) -> Option<Warning> {
        let kind = if is_clipping {
            WarningKind::Clipping
        } else if rms < self.thresholds.volume_min {
            WarningKind::Quiet
        } else if rms > self.thresholds.volume_max {
            WarningKind::Loud
        } else {
            return None;
        };

        if !self.cooldowns.should_fire(kind, now) {
            return None;
        }

        let warning = Warning::new(kind);
        warn!(kind = kind.as_str(), "{}", warning.message);
        Some(warning)
    }
}
