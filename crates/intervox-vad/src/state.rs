use std::time::{Duration, Instant};

/// Detection state, tagged explicitly.
///
/// `Candidate` carries the time voice was first observed; `Active` means the
/// candidate survived the minimum speech duration and `SpeechStart` has
/// fired. There is no sentinel timestamp: "no candidate" is a variant, not a
/// zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeechState {
    NotSpeaking,
    Candidate { since: Instant },
    Active,
}

impl SpeechState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_candidate(&self) -> bool {
        matches!(self, Self::Candidate { .. })
    }
}

/// Transition produced by one tick of the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeechTransition {
    Started,
    Ended { silence: Duration },
}

/// The hysteresis core: voiced/unvoiced decisions in, confirmed speech
/// boundaries out.
pub struct SpeechStateMachine {
    state: SpeechState,
    /// Last tick on which voice was observed while speech was confirmed.
    /// This is the reference point for the silence clock.
    last_speech_time: Option<Instant>,
    min_speech_duration: Duration,
    silence_threshold: Duration,
}

impl SpeechStateMachine {
    pub fn new(min_speech_duration: Duration, silence_threshold: Duration) -> Self {
        Self {
            state: SpeechState::NotSpeaking,
            last_speech_time: None,
            min_speech_duration,
            silence_threshold,
        }
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    pub fn last_speech_time(&self) -> Option<Instant> {
        self.last_speech_time
    }

    pub fn set_silence_threshold(&mut self, threshold: Duration) {
        self.silence_threshold = threshold;
    }

    /// Advance the machine by one tick.
    ///
    /// Transitions:
    /// - NotSpeaking → Candidate when voice appears (no event).
    /// - Candidate → Active once the candidate is `min_speech_duration` old
    ///   and still voiced; emits `Started` exactly once.
    /// - Candidate → NotSpeaking the moment voice drops before confirmation;
    ///   never emits anything.
    /// - Active holds while voiced, refreshing the silence clock each tick.
    /// - Active → NotSpeaking once `silence_threshold` has elapsed with no
    ///   voice; emits `Ended` with the measured silence, exactly once.
    pub fn process(&mut self, is_voice: bool, now: Instant) -> Option<SpeechTransition> {
        if is_voice {
            match self.state {
                SpeechState::NotSpeaking => {
                    self.state = SpeechState::Candidate { since: now };
                    // A zero minimum confirms on the same tick.
                    self.try_confirm(now)
                }
                SpeechState::Candidate { .. } => self.try_confirm(now),
                SpeechState::Active => {
                    self.last_speech_time = Some(now);
                    None
                }
            }
        } else {
            match self.state {
                SpeechState::NotSpeaking => None,
                SpeechState::Candidate { .. } => {
                    // Voice dropped before confirmation; the candidate decays
                    // silently.
                    self.state = SpeechState::NotSpeaking;
                    None
                }
                SpeechState::Active => {
                    // Active always records a last-speech time on entry; fall
                    // back to starting the clock now if it is ever missing.
                    let last = *self.last_speech_time.get_or_insert(now);
                    let silence = now.duration_since(last);
                    if silence >= self.silence_threshold {
                        self.state = SpeechState::NotSpeaking;
                        self.last_speech_time = None;
                        Some(SpeechTransition::Ended { silence })
                    } else {
                        None
                    }
                }
            }
        }
    }

    fn try_confirm(&mut self, now: Instant) -> Option<SpeechTransition> {
        if let SpeechState::Candidate { since } = self.state {
            if now.duration_since(since) >= self.min_speech_duration {
                self.state = SpeechState::Active;
                self.last_speech_time = Some(now);
                return Some(SpeechTransition::Started);
            }
        }
        None
    }

    pub fn reset(&mut self) {
        self.state = SpeechState::NotSpeaking;
        self.last_speech_time = None;
    }
}
