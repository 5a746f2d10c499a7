use anyhow::Result;
use tracing::info;

use intervox_app::sources::{ScriptedSource, Segment};
use intervox_app::{PipelineEvent, PipelineMetrics, TickDriver};
use intervox_audio::constants::DEFAULT_FRAME_SIZE_SAMPLES;
use intervox_foundation::clock::real_clock;
use intervox_quality::{QualityScorer, QualityThresholds};
use intervox_vad::{VadConfig, VoiceActivityDetector};

fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_level).init();
}

/// Demo run: a scripted "interview" (silence, speech, pause, loud speech)
/// through the full monitoring pipeline, with events logged as the
/// presentation layer would render them.
fn main() -> Result<()> {
    init_logging();
    info!("starting intervox monitoring demo");

    let vad_config = VadConfig::from_env();
    let thresholds = QualityThresholds::from_env();
    let interval_ms = vad_config.check_interval_ms as u64;

    // 1 s silence, 3 s speech, 3 s pause, 2 s too-loud speech, then silence.
    let script = vec![
        Segment::new(0.0, 20),
        Segment::new(0.3, 60),
        Segment::new(0.0, 60),
        Segment::new(0.99, 40),
        Segment::new(0.0, 60),
    ];
    let source = ScriptedSource::new(script, DEFAULT_FRAME_SIZE_SAMPLES, interval_ms);

    let clock = real_clock();
    let vad = VoiceActivityDetector::with_clock(vad_config, clock.clone());
    let scorer = QualityScorer::with_clock(thresholds, clock.clone());
    let metrics = PipelineMetrics::new();

    let (mut driver, events) = TickDriver::new(source, vad, scorer, clock, metrics.clone());
    driver.start()?;
    driver.run_for_ticks(240);
    driver.stop();

    for event in events.try_iter() {
        match event {
            PipelineEvent::SpeechStart { timestamp_ms } => {
                info!(timestamp_ms, "speech started");
            }
            PipelineEvent::SpeechEnd {
                timestamp_ms,
                silence_duration_s,
            } => {
                info!(timestamp_ms, silence_duration_s, "speech ended");
            }
            PipelineEvent::Warning(warning) => {
                info!(kind = warning.kind.as_str(), "{}", warning.message);
            }
            // Per-tick volume and quality updates are for live meters; too
            // chatty for the demo log.
            PipelineEvent::VolumeChange { .. } | PipelineEvent::QualityUpdate(_) => {}
        }
    }

    let session = driver.scorer().metrics();
    info!(
        frames = session.total_frames,
        score = session.quality_score,
        speech_segments = driver.vad().metrics().speech_segments,
        "session summary"
    );
    Ok(())
}
