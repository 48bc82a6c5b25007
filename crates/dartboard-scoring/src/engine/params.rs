use dartboard_core::CalibrationParams;
use serde::{Deserialize, Serialize};

use crate::debounce::DebounceParams;
use crate::turn::DEFAULT_MAX_SCORE;

/// Configuration for [`ScoringEngine`](super::ScoringEngine).
///
/// Every field has a default, so `{}` is a valid JSON configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    pub debounce: DebounceParams,
    /// Target total of a leg.
    pub max_score: i32,
    /// Board proportions and boundary rounding.
    pub calibration: CalibrationParams,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            debounce: DebounceParams::default(),
            max_score: DEFAULT_MAX_SCORE,
            calibration: CalibrationParams::default(),
        }
    }
}
