//! High-level facade for the `dartboard-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry crate (`dartboard::core`) and the scoring
//!   engine (`dartboard::scoring`)
//! - one-shot helpers in [`quick`] used by the `dartboard` command-line tool
//!
//! ## Quickstart
//!
//! ```
//! use dartboard::{EngineParams, NullSink, ScoringEngine};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = ScoringEngine::new(EngineParams::default())?;
//! engine.fit_calibration(Point2::new(320.0, 240.0), 200.0)?;
//! engine.start_turn(false);
//! engine.frame_tick(Some(Point2::new(320.0, 150.0)), 0.0, &mut NullSink)?;
//! println!("total: {}", engine.turn().current_score());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `dartboard::core`: calibration, zone radii, point classification, circle
//!   and blob reduction.
//! - `dartboard::scoring`: score events, turn state, debouncer, engine,
//!   session replay.

pub use dartboard_core as core;
pub use dartboard_scoring as scoring;

pub use dartboard_core::{
    classify_point, Calibration, CalibrationError, CalibrationParams, Classification, Ring,
    ZoneHit, ZoneRadii,
};
pub use dartboard_scoring::{
    replay_session, EngineError, EngineParams, FrameOutcome, NullSink, ScoreEvent, ScoreSink,
    ScoringEngine, SessionReport, SessionScript, ThrowOutcome, TurnState,
};

pub mod quick;
