//! Session-level quality scoring tests
//!
//! Tests cover:
//! - Composite score under clean, clipped, quiet and noisy sessions
//! - Penalty caps
//! - Per-kind warning cooldowns
//! - Metrics lifecycle (accumulate while running, freeze on stop)

use intervox_audio::{FrameFeatures, SilenceSource};
use intervox_foundation::clock::{test_clock, TestClock};
use intervox_quality::{
    QualityLevel, QualityScorer, QualityThresholds, VolumeState, WarningKind,
};
use std::sync::Arc;
use std::time::Duration;

const TICK_MS: u64 = 50;

fn features(rms: f64, peak: f64, clip_count: u32) -> FrameFeatures {
    FrameFeatures {
        rms,
        peak,
        clip_count,
    }
}

fn started_scorer() -> (QualityScorer, Arc<TestClock>) {
    let clock = test_clock();
    let mut scorer = QualityScorer::with_clock(QualityThresholds::default(), clock.clone());
    let mut source = SilenceSource::default();
    scorer.start(&mut source).expect("silence source acquires");
    (scorer, clock)
}

// ─── Composite score ────────────────────────────────────────────────

#[test]
fn clean_session_scores_a_perfect_hundred() {
    let (mut scorer, clock) = started_scorer();

    // 1000 frames at rms 0.3: inside the normal band, no clipping.
    for _ in 0..1000 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.3, 0.4, 0));
    }

    let m = scorer.metrics();
    assert_eq!(m.total_frames, 1000);
    assert_eq!(m.quality_score, 100);
    assert_eq!(m.too_quiet_frames, 0);
    assert_eq!(m.too_loud_frames, 0);
    assert_eq!(m.clipping_events, 0);

    let status = scorer.quality_status();
    assert_eq!(status.level, QualityLevel::Good);
    assert_eq!(status.volume_state, VolumeState::Normal);
    assert!(!status.is_clipping);
}

#[test]
fn fully_clipped_session_caps_the_clipping_penalty() {
    let (mut scorer, clock) = started_scorer();

    // Every frame clips: the ratio-based penalty (ratio * 1000) would be
    // 1000, but it is capped at 30 points.
    for _ in 0..200 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.5, 1.0, 20));
    }

    let m = scorer.metrics();
    assert_eq!(m.clipping_events, m.total_frames);
    assert_eq!(m.quality_score, 70);
    assert_eq!(scorer.quality_status().level, QualityLevel::Fair);
}

#[test]
fn quiet_noisy_session_stacks_quiet_and_noise_penalties() {
    let (mut scorer, clock) = started_scorer();

    // Every frame carries low-level signal below volume_min (0.05): all
    // frames are too quiet (penalty capped at 25) and all contribute to the
    // noise floor estimate (0.01 / 0.05 * 10 = 2 points).
    for _ in 0..100 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.01, 0.02, 0));
    }

    let m = scorer.metrics();
    assert_eq!(m.too_quiet_frames, 100);
    assert_eq!(m.noise_samples, 100);
    assert_eq!(m.quality_score, 73);
    assert_eq!(scorer.quality_status().level, QualityLevel::Fair);
}

#[test]
fn loud_session_caps_the_loud_penalty() {
    let (mut scorer, clock) = started_scorer();

    for _ in 0..100 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.97, 0.97, 0));
    }

    let m = scorer.metrics();
    assert_eq!(m.too_loud_frames, 100);
    // Loud penalty (ratio * 100) capped at 20.
    assert_eq!(m.quality_score, 80);
    assert_eq!(scorer.quality_status().level, QualityLevel::Good);
}

#[test]
fn score_recovers_as_clean_frames_dilute_bad_ones() {
    let (mut scorer, clock) = started_scorer();

    for _ in 0..10 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.5, 1.0, 20));
    }
    let degraded = scorer.metrics().quality_score;
    assert!(degraded < 100);

    for _ in 0..990 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.3, 0.4, 0));
    }
    // 10 / 1000 clipped frames: penalty = 0.01 * 1000 = 10 points.
    assert_eq!(scorer.metrics().quality_score, 90);
    assert!(scorer.metrics().quality_score > degraded);
}

// ─── Warning cooldowns ──────────────────────────────────────────────

#[test]
fn clipping_warning_fires_at_most_once_per_cooldown_window() {
    let (mut scorer, clock) = started_scorer();

    let mut warnings = 0;
    // 3 s cooldown at 50 ms ticks: 180 ticks span 9 s of persistent clipping.
    for _ in 0..180 {
        clock.advance_ms(TICK_MS);
        let update = scorer.process(&features(0.5, 1.0, 20)).unwrap();
        if let Some(warning) = update.warning {
            assert_eq!(warning.kind, WarningKind::Clipping);
            warnings += 1;
        }
    }

    // Fires on the first tick, then again once each 3 s window elapses
    // (ticks 61 and 121).
    assert_eq!(warnings, 3);
}

#[test]
fn warning_kinds_cool_down_independently() {
    let (mut scorer, clock) = started_scorer();

    // Quiet warning fires.
    clock.advance_ms(TICK_MS);
    let update = scorer.process(&features(0.01, 0.02, 0)).unwrap();
    assert_eq!(update.warning.as_ref().map(|w| w.kind), Some(WarningKind::Quiet));

    // A clipping warning right afterwards is a different kind, so the quiet
    // cooldown does not suppress it.
    clock.advance_ms(TICK_MS);
    let update = scorer.process(&features(0.5, 1.0, 20)).unwrap();
    assert_eq!(
        update.warning.as_ref().map(|w| w.kind),
        Some(WarningKind::Clipping)
    );

    // But a second quiet warning inside the window is suppressed.
    clock.advance_ms(TICK_MS);
    let update = scorer.process(&features(0.01, 0.02, 0)).unwrap();
    assert_eq!(update.warning, None);
}

#[test]
fn quality_update_is_emitted_every_tick() {
    let (mut scorer, clock) = started_scorer();

    for _ in 0..10 {
        clock.advance_ms(TICK_MS);
        let update = scorer.process(&features(0.3, 0.4, 0)).unwrap();
        assert_eq!(update.status.score, 100);
        assert_eq!(update.warning, None);
    }
}

// ─── Lifecycle ──────────────────────────────────────────────────────

#[test]
fn total_frames_increment_per_tick_and_freeze_on_stop() {
    let (mut scorer, clock) = started_scorer();

    for expected in 1..=50u64 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.3, 0.4, 0));
        assert_eq!(scorer.metrics().total_frames, expected);
    }

    scorer.stop();
    let frozen = scorer.metrics();

    // Ticks after stop change nothing.
    clock.advance_ms(TICK_MS);
    assert_eq!(scorer.process(&features(0.9, 1.0, 50)), None);
    assert_eq!(scorer.metrics(), frozen);
}

#[test]
fn elapsed_tracks_the_session_and_freezes_on_stop() {
    let (mut scorer, clock) = started_scorer();

    for _ in 0..40 {
        clock.advance_ms(TICK_MS);
        scorer.process(&features(0.3, 0.4, 0));
    }
    assert_eq!(scorer.elapsed(), Duration::from_secs(2));

    scorer.stop();
    clock.advance_ms(10_000);
    assert_eq!(scorer.elapsed(), Duration::from_secs(2));
}

#[test]
fn restart_resets_metrics_and_cooldowns() {
    let (mut scorer, clock) = started_scorer();

    clock.advance_ms(TICK_MS);
    let update = scorer.process(&features(0.5, 1.0, 20)).unwrap();
    assert!(update.warning.is_some());
    scorer.stop();

    let mut source = SilenceSource::default();
    scorer.start(&mut source).unwrap();
    assert_eq!(scorer.metrics().total_frames, 0);
    assert_eq!(scorer.metrics().quality_score, 100);

    // Cooldowns were reset too: the same warning fires immediately.
    clock.advance_ms(TICK_MS);
    let update = scorer.process(&features(0.5, 1.0, 20)).unwrap();
    assert!(update.warning.is_some());
}
