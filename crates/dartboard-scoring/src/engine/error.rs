use dartboard_core::{CalibrationError, ThrowInputError};

use crate::turn::TurnError;

/// Errors returned by the scoring engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid calibration: {0}")]
    InvalidCalibration(#[from] CalibrationError),
    #[error("invalid throw input: {0}")]
    InvalidThrowInput(#[from] ThrowInputError),
    #[error("invalid leg state: {0}")]
    InvalidState(#[from] TurnError),
    #[error("debounce interval must be finite and non-negative (got {min_interval_s})")]
    InvalidDebounce { min_interval_s: f64 },
}
