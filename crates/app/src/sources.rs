//! Synthetic audio sources for the demo binary and integration tests.
//!
//! Real capture lives outside this repository; these sources implement the
//! same [`AudioSource`] contract with generated signal.

use intervox_audio::{AudioFrame, AudioSource};
use intervox_foundation::AudioError;

/// Continuous sine tone at a fixed amplitude.
pub struct SineSource {
    frequency_hz: f64,
    amplitude: f64,
    sample_rate_hz: u32,
    frame_size: usize,
    interval_ms: u64,
    phase: f64,
    frames_emitted: u64,
    acquired: bool,
}

impl SineSource {
    pub fn new(
        frequency_hz: f64,
        amplitude: f64,
        sample_rate_hz: u32,
        frame_size: usize,
        interval_ms: u64,
    ) -> Self {
        Self {
            frequency_hz,
            amplitude: amplitude.clamp(0.0, 1.0),
            sample_rate_hz,
            frame_size,
            interval_ms,
            phase: 0.0,
            frames_emitted: 0,
            acquired: false,
        }
    }
}

impl AudioSource for SineSource {
    fn acquire(&mut self) -> Result<(), AudioError> {
        self.acquired = true;
        Ok(())
    }

    fn next_frame(&mut self) -> AudioFrame {
        let step = 2.0 * std::f64::consts::PI * self.frequency_hz / self.sample_rate_hz as f64;
        let samples = (0..self.frame_size)
            .map(|_| {
                let s = (self.phase.sin() * self.amplitude) as f32;
                self.phase += step;
                s
            })
            .collect();
        self.phase %= 2.0 * std::f64::consts::PI;

        let timestamp_ms = self.frames_emitted * self.interval_ms;
        self.frames_emitted += 1;
        AudioFrame::new(samples, timestamp_ms)
    }

    fn release(&mut self) {
        self.acquired = false;
    }
}

/// One segment of a scripted capture: `ticks` frames of constant amplitude.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub amplitude: f64,
    pub ticks: u64,
}

impl Segment {
    pub fn new(amplitude: f64, ticks: u64) -> Self {
        Self { amplitude, ticks }
    }
}

/// Plays back a fixed schedule of amplitude segments, then silence forever.
/// Constant-amplitude frames make the expected RMS exact, which keeps
/// integration tests deterministic.
pub struct ScriptedSource {
    segments: Vec<Segment>,
    frame_size: usize,
    interval_ms: u64,
    position: u64,
    frames_emitted: u64,
    acquired: bool,
}

impl ScriptedSource {
    pub fn new(segments: Vec<Segment>, frame_size: usize, interval_ms: u64) -> Self {
        Self {
            segments,
            frame_size,
            interval_ms,
            position: 0,
            frames_emitted: 0,
            acquired: false,
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    fn amplitude_at(&self, mut tick: u64) -> f64 {
        for segment in &self.segments {
            if tick < segment.ticks {
                return segment.amplitude;
            }
            tick -= segment.ticks;
        }
        0.0
    }
}

impl AudioSource for ScriptedSource {
    fn acquire(&mut self) -> Result<(), AudioError> {
        self.acquired = true;
        Ok(())
    }

    fn next_frame(&mut self) -> AudioFrame {
        let amplitude = self.amplitude_at(self.position) as f32;
        self.position += 1;

        let timestamp_ms = self.frames_emitted * self.interval_ms;
        self.frames_emitted += 1;
        AudioFrame::new(vec![amplitude; self.frame_size], timestamp_ms)
    }

    fn release(&mut self) {
        self.acquired = false;
    }
}
