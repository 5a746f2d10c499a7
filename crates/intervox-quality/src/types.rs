//! Quality classification and warning types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall session quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLevel {
    Good,
    Fair,
    Poor,
}

impl QualityLevel {
    /// Band for a composite score: 80+ Good, 50+ Fair, else Poor.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=100 => Self::Good,
            50..=79 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// Instantaneous volume classification of the latest frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeState {
    Quiet,
    Normal,
    Loud,
}

/// The three warning categories, used as a fixed index into the per-kind
/// cooldown table. An enum rather than string keys: a typo here is a compile
/// error, not a silently never-firing warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    Clipping,
    Quiet,
    Loud,
}

impl WarningKind {
    pub const ALL: [WarningKind; 3] = [Self::Clipping, Self::Quiet, Self::Loud];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Clipping => 0,
            Self::Quiet => 1,
            Self::Loud => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clipping => "clipping",
            Self::Quiet => "quiet",
            Self::Loud => "loud",
        }
    }
}

/// An operator-facing warning, rate-limited per kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind) -> Self {
        let message = match kind {
            WarningKind::Clipping => {
                "Audio is clipping - ask the witness to move back or reduce mic gain".to_string()
            }
            WarningKind::Quiet => {
                "Audio is very quiet - ask the witness to speak up or raise mic gain".to_string()
            }
            WarningKind::Loud => {
                "Audio is very loud - lower the mic gain before it distorts".to_string()
            }
        };
        Self { kind, message }
    }

    pub fn suggested_action(&self) -> &'static str {
        match self.kind {
            WarningKind::Clipping => "Reduce microphone gain",
            WarningKind::Quiet => "Speak louder or increase microphone gain",
            WarningKind::Loud => "Lower microphone gain",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

/// Read-only snapshot for the live quality display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityStatus {
    pub level: QualityLevel,
    pub score: u8,
    /// Latest RMS scaled for a 0..1 meter.
    pub volume_display: f64,
    /// Latest frame peak.
    pub peak: f64,
    pub volume_state: VolumeState,
    pub is_clipping: bool,
}

impl QualityStatus {
    /// 0 = fine, 1 = attention, 2 = actively degrading the recording.
    pub fn severity(&self) -> u8 {
        if self.is_clipping {
            2
        } else if self.volume_state != VolumeState::Normal || self.level != QualityLevel::Good {
            1
        } else {
            0
        }
    }
}
