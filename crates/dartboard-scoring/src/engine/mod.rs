//! Frame-driven scoring engine.
//!
//! Wires calibration, point classification, impact debouncing and the leg
//! state together behind a single `frame_tick` entry point.

mod error;
mod params;
mod pipeline;
mod result;
mod sink;

pub use error::EngineError;
pub use params::EngineParams;
pub use pipeline::{EngineState, ScoringEngine};
pub use result::{FrameOutcome, ScoredThrow};
pub use sink::{NullSink, ScoreSink};
