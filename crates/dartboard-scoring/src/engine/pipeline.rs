use dartboard_core::{
    classify_point, select_board_circle, Calibration, CircleCandidate, CircleSearchParams,
    ThrowInputError,
};
use log::{debug, info, trace, warn};
use nalgebra::Point2;

use super::{EngineError, EngineParams, FrameOutcome, ScoreSink, ScoredThrow};
use crate::debounce::ImpactDebouncer;
use crate::score::resolve_score;
use crate::turn::{TurnError, TurnState};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Engine lifecycle. There is no terminal state; a finished leg is reported
/// through [`ThrowOutcome::Finished`](crate::ThrowOutcome::Finished).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineState {
    /// Waiting for a calibration.
    Idle,
    /// Calibrated; frames are scored.
    Armed,
}

/// Single-threaded scoring engine, one instance per board.
#[derive(Clone, Debug)]
pub struct ScoringEngine {
    params: EngineParams,
    calibration: Option<Calibration>,
    debouncer: ImpactDebouncer,
    turn: TurnState,
}

impl ScoringEngine {
    /// Build an idle engine.
    pub fn new(params: EngineParams) -> Result<Self, EngineError> {
        if !params.debounce.is_valid() {
            return Err(EngineError::InvalidDebounce {
                min_interval_s: params.debounce.min_interval_s,
            });
        }
        if params.max_score < 0 {
            return Err(TurnError::NegativeMaxScore {
                max_score: params.max_score,
            }
            .into());
        }
        params.calibration.proportions.validate()?;

        Ok(Self {
            params,
            calibration: None,
            debouncer: ImpactDebouncer::new(params.debounce),
            turn: TurnState::new(params.max_score),
        })
    }

    #[inline]
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        if self.calibration.is_some() {
            EngineState::Armed
        } else {
            EngineState::Idle
        }
    }

    #[inline]
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    #[inline]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Fit (or re-fit) the board circle and arm the engine.
    ///
    /// On error the previous calibration, if any, stays in place. A new
    /// calibration clears the debounce history.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn fit_calibration(
        &mut self,
        center: Point2<f64>,
        radius: f64,
    ) -> Result<&Calibration, EngineError> {
        let calibration = Calibration::fit_with(center, radius, &self.params.calibration)
            .inspect_err(|err| warn!("calibration rejected: {err}"))?;
        Ok(self.arm(calibration))
    }

    /// Pick the board outline among detector circles and fit it.
    ///
    /// Returns `Ok(false)` and leaves the engine untouched when no candidate
    /// falls inside the search window.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, candidates), fields(candidates = candidates.len()))
    )]
    pub fn calibrate_from_circles(
        &mut self,
        candidates: &[CircleCandidate],
        search: &CircleSearchParams,
    ) -> Result<bool, EngineError> {
        let Some(board) = select_board_circle(candidates, search) else {
            debug!(
                "no board circle among {} candidates (radius {}..={})",
                candidates.len(),
                search.min_radius,
                search.max_radius
            );
            return Ok(false);
        };
        let calibration = board
            .to_calibration(&self.params.calibration)
            .inspect_err(|err| warn!("calibration rejected: {err}"))?;
        self.arm(calibration);
        Ok(true)
    }

    fn arm(&mut self, calibration: Calibration) -> &Calibration {
        info!(
            "board calibrated: center=({:.1}, {:.1}) radius={:.1}",
            calibration.center().x,
            calibration.center().y,
            calibration.radius()
        );
        self.debouncer.reset();
        self.calibration.insert(calibration)
    }

    /// Process one frame's impact candidate.
    ///
    /// While idle every frame is ignored. An accepted impact is classified,
    /// scored, applied to the leg and reported to `sink` with the running
    /// total, whatever the throw outcome.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, sink)))]
    pub fn frame_tick<S>(
        &mut self,
        candidate: Option<Point2<f64>>,
        timestamp_s: f64,
        sink: &mut S,
    ) -> Result<FrameOutcome, EngineError>
    where
        S: ScoreSink + ?Sized,
    {
        let Some(calibration) = self.calibration.as_ref() else {
            trace!("frame at t={timestamp_s:.3}s ignored: engine idle");
            return Ok(FrameOutcome::Idle);
        };
        let Some(point) = candidate else {
            return Ok(FrameOutcome::NoCandidate);
        };
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ThrowInputError::NonFinitePoint {
                x: point.x,
                y: point.y,
            }
            .into());
        }
        let Some(impact) = self.debouncer.offer(point, timestamp_s) else {
            return Ok(FrameOutcome::Debounced);
        };

        let classification = classify_point(impact.position, calibration)?;
        let event = resolve_score(classification.hit);
        debug!(
            "impact ({:.1}, {:.1}) -> {:?} value={} (d={:.2}, angle={:.2})",
            impact.position.x,
            impact.position.y,
            event.ring,
            event.value,
            classification.distance,
            classification.angle_deg
        );
        let result = self.turn.apply_throw(&event)?;
        sink.on_score(&event, result.total);

        Ok(FrameOutcome::Scored(ScoredThrow {
            impact,
            classification,
            event,
            result,
        }))
    }

    /// Open a new turn.
    pub fn start_turn(&mut self, last_round: bool) {
        self.turn.start_turn(last_round);
    }

    /// Restart the leg from zero. Calibration and debounce history are kept.
    pub fn reset_leg(&mut self) {
        info!("leg reset (max_score={})", self.turn.max_score());
        self.turn.reset_leg();
    }

    /// Replace the leg state, e.g. to resume a leg from a saved total.
    pub fn restore_turn(&mut self, turn: TurnState) {
        self.turn = turn;
    }
}
