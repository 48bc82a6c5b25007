//! Turn state, bust rules and impact debouncing on top of `dartboard-core`.
//!
//! The entry point is [`ScoringEngine`]: feed it a calibration once, then one
//! [`frame_tick`](ScoringEngine::frame_tick) per camera frame. Accepted darts
//! are reported to a [`ScoreSink`] and returned as [`FrameOutcome::Scored`].
//!
//! ```
//! use dartboard_scoring::{EngineParams, FrameOutcome, NullSink, ScoringEngine};
//! use nalgebra::Point2;
//!
//! let mut engine = ScoringEngine::new(EngineParams::default())?;
//! engine.fit_calibration(Point2::new(320.0, 240.0), 200.0)?;
//! engine.start_turn(false);
//!
//! let out = engine.frame_tick(Some(Point2::new(320.0, 240.0)), 0.0, &mut NullSink)?;
//! assert!(matches!(out, FrameOutcome::Scored(t) if t.event.value == 50));
//! # Ok::<(), dartboard_scoring::EngineError>(())
//! ```

mod debounce;
mod engine;
mod io;
mod replay;
mod score;
mod turn;

pub use debounce::{DebounceParams, ImpactDebouncer, DEFAULT_MIN_INTERVAL_S};
pub use engine::{
    EngineError, EngineParams, EngineState, FrameOutcome, NullSink, ScoreSink, ScoredThrow,
    ScoringEngine,
};
pub use io::{SessionIoError, SessionReport, SessionScript, SessionStep, ThrowRecord};
pub use replay::replay_session;
pub use score::{resolve_score, ScoreEvent, BULL_POINTS, IRIS_POINTS};
pub use turn::{
    ThrowOutcome, ThrowResult, TurnError, TurnState, DARTS_PER_TURN, DEFAULT_MAX_SCORE,
};
