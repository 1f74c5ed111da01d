//! Challenge gestures and terminal verdicts.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A head or face gesture the user can be challenged to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    Smile,
    Blink,
    ZoomIn,
    ZoomOut,
    LeftTurn,
    RightTurn,
    UpTurn,
    DownTurn,
}

/// Gestures eligible for random selection at session start. Up/down
/// tilts are detectable but only run when requested explicitly.
pub const CHALLENGE_POOL: [ChallengeType; 6] = [
    ChallengeType::Smile,
    ChallengeType::Blink,
    ChallengeType::ZoomIn,
    ChallengeType::ZoomOut,
    ChallengeType::LeftTurn,
    ChallengeType::RightTurn,
];

impl ChallengeType {
    /// Draw a challenge uniformly from [`CHALLENGE_POOL`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *CHALLENGE_POOL
            .choose(rng)
            .expect("challenge pool is non-empty")
    }

    pub fn is_zoom(self) -> bool {
        matches!(self, Self::ZoomIn | Self::ZoomOut)
    }

    pub fn is_yaw_turn(self) -> bool {
        matches!(self, Self::LeftTurn | Self::RightTurn)
    }

    pub fn is_pitch_turn(self) -> bool {
        matches!(self, Self::UpTurn | Self::DownTurn)
    }

    /// User-facing instruction for this challenge.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Smile => "SMILE\nPlease smile",
            Self::Blink => "BLINK\nPerform a blink",
            Self::ZoomIn => "ZOOM IN\nBring the device towards your face",
            Self::ZoomOut => "ZOOM OUT\nMove the device away from your face",
            Self::LeftTurn => "LEFT TURN\nTurn your head to the left",
            Self::RightTurn => "RIGHT TURN\nTurn your head to the right",
            Self::UpTurn => "HEAD UP\nMove your head upwards",
            Self::DownTurn => "HEAD DOWN\nMove your head downwards",
        }
    }
}

/// Terminal outcome of a liveness session. Exactly one verdict fires
/// per session; a cancelled session fires none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Success,
    Failed,
    SpoofingDetected,
    TimedOut,
}

/// Per-frame hint for the presentation layer (border color, prompt
/// text). Best-effort: fired after every processed frame until the
/// session is terminal, never part of the verdict contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameFeedback {
    pub face_detected: bool,
    pub challenge: ChallengeType,
}

impl FrameFeedback {
    /// Prompt to display for this frame: the challenge instruction when
    /// a face is in frame, a repositioning hint otherwise.
    pub fn prompt(&self) -> &'static str {
        if self.face_detected {
            self.challenge.prompt()
        } else {
            "Keep your face inside the frame"
        }
    }
}
