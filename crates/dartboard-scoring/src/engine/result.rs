use dartboard_core::{Classification, ImpactPoint};
use serde::{Deserialize, Serialize};

use crate::score::ScoreEvent;
use crate::turn::ThrowResult;

/// Everything known about one accepted dart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredThrow {
    pub impact: ImpactPoint,
    pub classification: Classification,
    pub event: ScoreEvent,
    pub result: ThrowResult,
}

/// What a single frame tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No calibration yet; the frame was ignored.
    Idle,
    /// The frame carried no impact candidate.
    NoCandidate,
    /// A candidate arrived inside the debounce window.
    Debounced,
    Scored(ScoredThrow),
}

impl FrameOutcome {
    pub fn scored(&self) -> Option<&ScoredThrow> {
        match self {
            FrameOutcome::Scored(throw) => Some(throw),
            _ => None,
        }
    }
}
