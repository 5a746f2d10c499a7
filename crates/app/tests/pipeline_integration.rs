//! End-to-end pipeline tests: scripted capture through the tick driver,
//! checking event fan-out, lifecycle guarantees and telemetry.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use intervox_app::sources::{ScriptedSource, Segment};
use intervox_app::{PipelineEvent, PipelineMetrics, TickDriver};
use intervox_foundation::clock::{test_clock, SharedClock, TestClock};
use intervox_quality::{QualityScorer, QualityThresholds, WarningKind};
use intervox_vad::{VadConfig, VoiceActivityDetector};

const FRAME_SIZE: usize = 2048;
const TICK_MS: u64 = 50;

fn driver_with(
    script: Vec<Segment>,
    clock: Arc<TestClock>,
) -> (
    TickDriver<ScriptedSource>,
    crossbeam_channel::Receiver<PipelineEvent>,
    PipelineMetrics,
) {
    let shared: SharedClock = clock;
    let vad = VoiceActivityDetector::with_clock(VadConfig::default(), shared.clone());
    let scorer = QualityScorer::with_clock(QualityThresholds::default(), shared.clone());
    let metrics = PipelineMetrics::new();
    let source = ScriptedSource::new(script, FRAME_SIZE, TICK_MS);
    let (driver, events) = TickDriver::new(source, vad, scorer, shared, metrics.clone());
    (driver, events, metrics)
}

#[test]
fn scripted_interview_produces_paired_speech_events() {
    let clock = test_clock();
    // 1 s silence, 3 s speech at a normal level, 3 s pause, 2 s of clipping
    // speech, then enough silence to close the last segment.
    let script = vec![
        Segment::new(0.0, 20),
        Segment::new(0.3, 60),
        Segment::new(0.0, 60),
        Segment::new(0.99, 40),
        Segment::new(0.0, 60),
    ];
    let (mut driver, events, metrics) = driver_with(script, clock);

    driver.start().expect("scripted source acquires");
    driver.run_for_ticks(240);
    driver.stop();

    let mut starts = 0;
    let mut ends = 0;
    let mut volume_updates = 0;
    let mut quality_updates = 0;
    let mut clipping_warnings = 0;
    for event in events.try_iter() {
        match event {
            PipelineEvent::SpeechStart { .. } => starts += 1,
            PipelineEvent::SpeechEnd {
                silence_duration_s, ..
            } => {
                ends += 1;
                assert!(silence_duration_s >= 2.0);
            }
            PipelineEvent::VolumeChange { .. } => volume_updates += 1,
            PipelineEvent::QualityUpdate(_) => quality_updates += 1,
            PipelineEvent::Warning(warning) => {
                if warning.kind == WarningKind::Clipping {
                    clipping_warnings += 1;
                }
            }
        }
    }

    // Two spoken blocks, each confirmed once and closed once.
    assert_eq!(starts, 2);
    assert_eq!(ends, 2);
    // Volume and quality land on every tick.
    assert_eq!(volume_updates, 240);
    assert_eq!(quality_updates, 240);
    // The 2 s clipping block spans less than the 3 s cooldown window.
    assert_eq!(clipping_warnings, 1);

    assert_eq!(metrics.frames_processed.load(Ordering::Relaxed), 240);
    assert_eq!(metrics.speech_events.load(Ordering::Relaxed), 4);

    let session = driver.scorer().metrics();
    assert_eq!(session.total_frames, 240);
    assert!(session.clipping_events >= 40);
    assert!(session.quality_score < 100);
}

#[test]
fn stop_halts_delivery_and_freezes_the_session() {
    let clock = test_clock();
    let (mut driver, events, _) = driver_with(vec![Segment::new(0.3, 1000)], clock);

    driver.start().unwrap();
    driver.run_for_ticks(20);
    driver.stop();
    let frozen = driver.scorer().metrics();
    assert_eq!(frozen.total_frames, 20);

    // Drain whatever the first 20 ticks produced.
    let drained: Vec<_> = events.try_iter().collect();
    assert!(!drained.is_empty());

    // Ticks after stop deliver nothing and mutate nothing.
    driver.run_for_ticks(50);
    driver.tick();
    assert_eq!(events.try_iter().count(), 0);
    assert_eq!(driver.scorer().metrics(), frozen);
    assert!(!driver.is_running());

    // Stop again: idempotent.
    driver.stop();
}

#[test]
fn stop_releases_the_capture_source() {
    let clock = test_clock();
    let (mut driver, _events, _) = driver_with(vec![Segment::new(0.0, 10)], clock);

    driver.start().unwrap();
    driver.run_for_ticks(5);
    driver.stop();

    // The driver owns the source; observe release through a fresh start,
    // which must re-acquire successfully and begin a new session.
    driver.start().unwrap();
    assert!(driver.is_running());
    assert_eq!(driver.scorer().metrics().total_frames, 0);
    driver.stop();
}

#[test]
fn unavailable_source_fails_start_once() {
    use intervox_audio::UnavailableSource;
    use intervox_foundation::AudioError;

    let shared: SharedClock = test_clock();
    let vad = VoiceActivityDetector::with_clock(VadConfig::default(), shared.clone());
    let scorer = QualityScorer::with_clock(QualityThresholds::default(), shared.clone());
    let (mut driver, events) = TickDriver::new(
        UnavailableSource::missing_device(),
        vad,
        scorer,
        shared,
        PipelineMetrics::new(),
    );

    assert!(matches!(
        driver.start(),
        Err(AudioError::DeviceNotFound { .. })
    ));
    assert!(!driver.is_running());

    // A failed start never ticks.
    driver.tick();
    assert_eq!(events.try_iter().count(), 0);
}

#[test]
fn mid_session_tuning_goes_through_the_driver() {
    let clock = test_clock();
    let (mut driver, _events, _) = driver_with(vec![Segment::new(0.3, 100)], clock);
    driver.start().unwrap();

    driver.vad_mut().set_sensitivity(10.0);
    assert_eq!(driver.vad().config().sensitivity, 0.1);
    driver.stop();
}
