//! Running score for one leg, with the bust rule.
//!
//! The total counts *up* from zero toward `max_score`; `remaining()` is the
//! conventional darts count-down. Turn boundaries are decided by the caller
//! through [`TurnState::start_turn`]; a turn that already holds three darts
//! rolls over to a new one on the next throw.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::score::ScoreEvent;

pub const DEFAULT_MAX_SCORE: i32 = 501;
pub const DARTS_PER_TURN: u8 = 3;

/// Broken leg invariants. The leg has to be reset before play continues.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    #[error("current score is negative ({score})")]
    NegativeScore { score: i32 },
    #[error("max score is negative ({max_score})")]
    NegativeMaxScore { max_score: i32 },
}

/// What happened to one dart.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowOutcome {
    /// Added to the total.
    Scored,
    /// Added and landed exactly on `max_score` with a finishing ring.
    Finished,
    /// Last round, non-finishing ring: ignored.
    Discarded,
    /// Overshoot on the last round: total reverted to the turn start.
    Bust,
    /// Thrown after a bust in the same turn.
    IgnoredAfterBust,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThrowResult {
    pub outcome: ThrowOutcome,
    /// Running total after the dart.
    pub total: i32,
    pub remaining: i32,
}

/// Score state of the leg in progress.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredTurn")]
pub struct TurnState {
    current_score: i32,
    max_score: i32,
    last_round: bool,
    can_win: bool,
    turn_start_score: i32,
    darts_in_turn: u8,
    busted: bool,
}

/// Saved leg as found on disk. A missing turn start means the save was
/// taken between turns, so the turn starts at the current total.
#[derive(Deserialize)]
struct StoredTurn {
    current_score: i32,
    max_score: i32,
    last_round: bool,
    can_win: bool,
    #[serde(default)]
    turn_start_score: Option<i32>,
    #[serde(default)]
    darts_in_turn: u8,
    #[serde(default)]
    busted: bool,
}

impl From<StoredTurn> for TurnState {
    fn from(stored: StoredTurn) -> Self {
        Self {
            last_round: stored.last_round,
            can_win: stored.can_win,
            turn_start_score: stored.turn_start_score.unwrap_or(stored.current_score),
            darts_in_turn: stored.darts_in_turn,
            busted: stored.busted,
            ..Self::resume(stored.current_score, stored.max_score)
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCORE)
    }
}

impl TurnState {
    /// Fresh leg with a zero total.
    pub fn new(max_score: i32) -> Self {
        Self::resume(0, max_score)
    }

    /// Continue a leg from a known total, at the start of a turn.
    ///
    /// Values are checked on the next [`apply_throw`](Self::apply_throw).
    pub fn resume(current_score: i32, max_score: i32) -> Self {
        Self {
            current_score,
            max_score,
            last_round: false,
            can_win: false,
            turn_start_score: current_score,
            darts_in_turn: 0,
            busted: false,
        }
    }

    #[inline]
    pub fn current_score(&self) -> i32 {
        self.current_score
    }

    #[inline]
    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    #[inline]
    pub fn remaining(&self) -> i32 {
        self.max_score.saturating_sub(self.current_score)
    }

    #[inline]
    pub fn last_round(&self) -> bool {
        self.last_round
    }

    /// Whether the most recent dart struck a finishing ring.
    #[inline]
    pub fn can_win(&self) -> bool {
        self.can_win
    }

    #[inline]
    pub fn turn_start_score(&self) -> i32 {
        self.turn_start_score
    }

    #[inline]
    pub fn darts_in_turn(&self) -> u8 {
        self.darts_in_turn
    }

    /// Open a new turn. `last_round` marks it as the deciding one.
    pub fn start_turn(&mut self, last_round: bool) {
        self.turn_start_score = self.current_score;
        self.last_round = last_round;
        self.darts_in_turn = 0;
        self.busted = false;
        debug!(
            "turn started at {} (last_round={last_round})",
            self.current_score
        );
    }

    /// Back to a zero total, keeping `max_score`.
    pub fn reset_leg(&mut self) {
        *self = Self::new(self.max_score);
    }

    fn check_invariants(&self) -> Result<(), TurnError> {
        if self.max_score < 0 {
            return Err(TurnError::NegativeMaxScore {
                max_score: self.max_score,
            });
        }
        if self.current_score < 0 {
            return Err(TurnError::NegativeScore {
                score: self.current_score,
            });
        }
        Ok(())
    }

    fn result(&self, outcome: ThrowOutcome) -> ThrowResult {
        ThrowResult {
            outcome,
            total: self.current_score,
            remaining: self.remaining(),
        }
    }

    /// Apply one accepted dart.
    pub fn apply_throw(&mut self, event: &ScoreEvent) -> Result<ThrowResult, TurnError> {
        self.check_invariants()?;

        if self.darts_in_turn >= DARTS_PER_TURN {
            self.start_turn(self.last_round);
        }
        self.darts_in_turn += 1;

        if self.busted {
            debug!("dart {} ignored: turn already bust", self.darts_in_turn);
            return Ok(self.result(ThrowOutcome::IgnoredAfterBust));
        }

        self.can_win = event.can_finish();
        let value = i32::try_from(event.value).unwrap_or(i32::MAX);
        let candidate = self.current_score.saturating_add(value);

        if !self.last_round {
            self.current_score = candidate;
            info!("scored {} ({:?}); total {}", event.value, event.ring, candidate);
            return Ok(self.result(ThrowOutcome::Scored));
        }

        if !self.can_win {
            debug!(
                "last round: {:?} cannot finish, {} discarded",
                event.ring, event.value
            );
            return Ok(self.result(ThrowOutcome::Discarded));
        }

        if candidate > self.max_score {
            warn!(
                "bust: {} + {} > {}; reverting to {}",
                self.current_score, event.value, self.max_score, self.turn_start_score
            );
            self.current_score = self.turn_start_score;
            self.busted = true;
            return Ok(self.result(ThrowOutcome::Bust));
        }

        self.current_score = candidate;
        let outcome = if candidate == self.max_score {
            info!("leg finished on {:?} {}", event.ring, event.value);
            ThrowOutcome::Finished
        } else {
            info!("scored {} ({:?}); total {}", event.value, event.ring, candidate);
            ThrowOutcome::Scored
        };
        Ok(self.result(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dartboard_core::Ring;

    fn event(sector: Option<usize>, ring: Ring) -> ScoreEvent {
        ScoreEvent::from_parts(sector, ring).expect("event")
    }

    fn raw(ring: Ring, value: u32) -> ScoreEvent {
        ScoreEvent {
            sector: None,
            ring,
            value,
        }
    }

    #[test]
    fn regular_throws_accumulate() {
        let mut state = TurnState::default();
        state.start_turn(false);
        let t20 = event(Some(0), Ring::Triple);
        state.apply_throw(&t20).expect("throw");
        let res = state.apply_throw(&t20).expect("throw");
        assert_eq!(res.outcome, ThrowOutcome::Scored);
        assert_eq!(res.total, 120);
        assert_eq!(res.remaining, 381);
        assert!(!state.can_win());
    }

    #[test]
    fn double_twenty_checks_out_forty() {
        // 40 remaining on a 501 leg.
        let mut state = TurnState::resume(461, 501);
        state.start_turn(true);
        let d20 = event(Some(0), Ring::Double);
        assert_eq!(d20.value, 40);
        let res = state.apply_throw(&d20).expect("throw");
        assert_eq!(res.outcome, ThrowOutcome::Finished);
        assert_eq!(res.remaining, 0);
        assert!(state.can_win());
    }

    #[test]
    fn overshoot_on_last_round_busts_to_turn_start() {
        let mut state = TurnState::resume(461, 501);
        state.start_turn(true);
        let res = state.apply_throw(&raw(Ring::Double, 41)).expect("throw");
        assert_eq!(res.outcome, ThrowOutcome::Bust);
        assert_eq!(res.total, 461);
        assert_eq!(res.remaining, 40);
    }

    #[test]
    fn bust_discards_earlier_darts_of_the_turn() {
        let mut state = TurnState::resume(441, 501);
        state.start_turn(true);
        // D10 leaves 40; a bull then overshoots.
        let first = state.apply_throw(&event(Some(6), Ring::Double)).expect("d10");
        assert_eq!(first.outcome, ThrowOutcome::Scored);
        assert_eq!(first.total, 461);
        let bust = state.apply_throw(&raw(Ring::Bull, 50)).expect("bull");
        assert_eq!(bust.outcome, ThrowOutcome::Bust);
        assert_eq!(bust.total, 441);
        let after = state.apply_throw(&event(Some(0), Ring::Double)).expect("d20");
        assert_eq!(after.outcome, ThrowOutcome::IgnoredAfterBust);
        assert_eq!(after.total, 441);

        state.start_turn(true);
        let retry = state.apply_throw(&raw(Ring::Bull, 50)).expect("bull");
        assert_eq!(retry.outcome, ThrowOutcome::Scored);
        assert_eq!(retry.total, 491);
    }

    #[test]
    fn non_finishing_ring_is_discarded_on_last_round() {
        let mut state = TurnState::resume(400, 501);
        state.start_turn(true);
        let res = state.apply_throw(&event(Some(0), Ring::Triple)).expect("t20");
        assert_eq!(res.outcome, ThrowOutcome::Discarded);
        assert_eq!(res.total, 400);
        assert!(!state.can_win());
    }

    #[test]
    fn overshoot_outside_last_round_is_simply_added() {
        let mut state = TurnState::resume(480, 501);
        state.start_turn(false);
        let res = state.apply_throw(&event(Some(0), Ring::Triple)).expect("t20");
        assert_eq!(res.outcome, ThrowOutcome::Scored);
        assert_eq!(res.total, 540);
        assert_eq!(res.remaining, -39);
    }

    #[test]
    fn fourth_dart_opens_a_new_turn() {
        let mut state = TurnState::resume(441, 501);
        state.start_turn(true);
        let s1 = event(Some(1), Ring::Double);
        for _ in 0..3 {
            state.apply_throw(&s1).expect("throw");
        }
        assert_eq!(state.darts_in_turn(), 3);
        assert_eq!(state.turn_start_score(), 441);
        state.apply_throw(&s1).expect("throw");
        assert_eq!(state.darts_in_turn(), 1);
        assert_eq!(state.turn_start_score(), 447);
        assert!(state.last_round());
    }

    #[test]
    fn negative_state_is_rejected_until_reset() {
        let mut state = TurnState::resume(-5, 501);
        let d20 = event(Some(0), Ring::Double);
        assert_eq!(
            state.apply_throw(&d20),
            Err(TurnError::NegativeScore { score: -5 })
        );
        assert!(state.apply_throw(&d20).is_err());
        state.reset_leg();
        assert_eq!(state.apply_throw(&d20).expect("throw").total, 40);

        let mut bad_max = TurnState::new(-1);
        assert_eq!(
            bad_max.apply_throw(&d20),
            Err(TurnError::NegativeMaxScore { max_score: -1 })
        );
    }

    #[test]
    fn restored_last_round_busts_back_to_saved_total() {
        let json = r#"{"current_score": 461, "max_score": 501, "last_round": true, "can_win": false}"#;
        let mut state: TurnState = serde_json::from_str(json).expect("json");
        assert_eq!(state.turn_start_score(), 461);
        let res = state.apply_throw(&raw(Ring::Bull, 50)).expect("bull");
        assert_eq!(res.outcome, ThrowOutcome::Bust);
        assert_eq!(res.total, 461);
        assert_eq!(res.remaining, 40);
    }

    #[test]
    fn saved_turn_start_is_kept() {
        let json = r#"{"current_score": 481, "max_score": 501, "last_round": true,
                       "can_win": true, "turn_start_score": 461, "darts_in_turn": 1}"#;
        let mut state: TurnState = serde_json::from_str(json).expect("json");
        let res = state.apply_throw(&raw(Ring::Bull, 50)).expect("bull");
        assert_eq!(res.outcome, ThrowOutcome::Bust);
        assert_eq!(res.total, 461);
        let again: TurnState =
            serde_json::from_str(&serde_json::to_string(&state).expect("ser")).expect("de");
        assert_eq!(again, state);
    }

    #[test]
    fn remaining_saturates_on_extreme_restored_totals() {
        assert_eq!(TurnState::resume(i32::MIN, 0).remaining(), i32::MAX);
        assert_eq!(TurnState::resume(-5, i32::MAX).remaining(), i32::MAX);
        let mut state = TurnState::resume(i32::MIN, 0);
        assert_eq!(
            state.apply_throw(&raw(Ring::Bull, 50)),
            Err(TurnError::NegativeScore { score: i32::MIN })
        );
    }

    #[test]
    fn restored_state_round_trips_through_json() {
        let json = r#"{"current_score": 100, "max_score": 301, "last_round": false, "can_win": false}"#;
        let mut state: TurnState = serde_json::from_str(json).expect("json");
        assert_eq!(state.remaining(), 201);
        state.start_turn(false);
        assert_eq!(state.turn_start_score(), 100);
    }
}
