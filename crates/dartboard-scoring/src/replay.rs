//! Offline replay of a recorded session through a [`ScoringEngine`].

use dartboard_core::select_impact;
use log::{info, warn};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::engine::{EngineError, FrameOutcome, NullSink, ScoringEngine};
use crate::io::{SessionReport, SessionScript, SessionStep, ThrowRecord};
use crate::turn::ThrowOutcome;

/// Run every step of `script` and summarise what the engine did.
///
/// Replay stops at the first engine error, which is recorded in
/// [`SessionReport::error`].
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(script), fields(steps = script.steps.len()))
)]
pub fn replay_session(script: &SessionScript) -> SessionReport {
    let mut report = SessionReport::default();
    let mut engine = match ScoringEngine::new(script.params) {
        Ok(engine) => engine,
        Err(err) => {
            warn!("engine rejected session params: {err}");
            report.set_error(err);
            return report;
        }
    };

    for (idx, step) in script.steps.iter().enumerate() {
        report.steps_run = idx + 1;
        if let Err(err) = run_step(&mut engine, script, idx, step, &mut report) {
            warn!("replay stopped at step {idx}: {err}");
            report.set_error(err);
            break;
        }
    }

    report.zones = engine.calibration().map(|c| c.zone_radii());
    report.final_total = engine.turn().current_score();
    report.remaining = engine.turn().remaining();
    report.finished = report
        .throws
        .iter()
        .any(|t| t.outcome == ThrowOutcome::Finished);
    info!(
        "replayed {} steps: {} throws, total {}",
        report.steps_run,
        report.throws.len(),
        report.final_total
    );
    report
}

fn run_step(
    engine: &mut ScoringEngine,
    script: &SessionScript,
    idx: usize,
    step: &SessionStep,
    report: &mut SessionReport,
) -> Result<(), EngineError> {
    let (candidate, t) = match step {
        SessionStep::Calibrate { center, radius } => {
            engine.fit_calibration(Point2::new(center[0], center[1]), *radius)?;
            return Ok(());
        }
        SessionStep::Circles { candidates } => {
            if !engine.calibrate_from_circles(candidates, &script.circle_search)? {
                warn!("step {idx}: no usable board circle");
            }
            return Ok(());
        }
        SessionStep::StartTurn { last_round } => {
            engine.start_turn(*last_round);
            return Ok(());
        }
        SessionStep::ResetLeg => {
            engine.reset_leg();
            return Ok(());
        }
        SessionStep::Frame { t, impact } => (impact.map(|[x, y]| Point2::new(x, y)), *t),
        SessionStep::Blobs { t, blobs } => (select_impact(blobs, &script.impact), *t),
    };

    report.frames += 1;
    match engine.frame_tick(candidate, t, &mut NullSink)? {
        FrameOutcome::Idle => report.idle_frames += 1,
        FrameOutcome::Debounced => report.debounced += 1,
        FrameOutcome::NoCandidate => {}
        FrameOutcome::Scored(throw) => report.throws.push(ThrowRecord::new(idx, &throw)),
    }
    Ok(())
}
