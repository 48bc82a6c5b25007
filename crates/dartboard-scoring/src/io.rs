//! JSON session scripts and replay reports.

use dartboard_core::{
    Blob, CircleCandidate, CircleSearchParams, ImpactSelectParams, Ring, ZoneRadii,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::engine::{EngineError, EngineParams, ScoredThrow};
use crate::turn::ThrowOutcome;

#[derive(thiserror::Error, Debug)]
pub enum SessionIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One recorded input to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionStep {
    /// Fit the board from a known circle.
    Calibrate { center: [f64; 2], radius: f64 },
    /// Fit the board from circle-detector output.
    Circles { candidates: Vec<CircleCandidate> },
    StartTurn {
        #[serde(default)]
        last_round: bool,
    },
    ResetLeg,
    /// A frame with an already extracted impact candidate (or none).
    Frame {
        t: f64,
        #[serde(default)]
        impact: Option<[f64; 2]>,
    },
    /// A frame given as contour blobs; the impact is extracted first.
    Blobs { t: f64, blobs: Vec<Blob> },
}

/// A recorded session: engine configuration plus the ordered inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub params: EngineParams,
    #[serde(default)]
    pub circle_search: CircleSearchParams,
    #[serde(default)]
    pub impact: ImpactSelectParams,
    pub steps: Vec<SessionStep>,
}

impl SessionScript {
    /// Load a JSON script from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this script to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// One accepted dart, flattened for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowRecord {
    /// Index of the script step that produced the dart.
    pub step: usize,
    pub t: f64,
    pub position: [f64; 2],
    #[serde(default)]
    pub sector: Option<u8>,
    pub ring: Ring,
    pub value: u32,
    pub outcome: ThrowOutcome,
    pub total: i32,
    pub remaining: i32,
    #[serde(default)]
    pub on_ring_edge: bool,
    #[serde(default)]
    pub on_sector_edge: bool,
}

impl ThrowRecord {
    pub fn new(step: usize, throw: &ScoredThrow) -> Self {
        Self {
            step,
            t: throw.impact.timestamp_s,
            position: [throw.impact.position.x, throw.impact.position.y],
            sector: throw.event.sector,
            ring: throw.event.ring,
            value: throw.event.value,
            outcome: throw.result.outcome,
            total: throw.result.total,
            remaining: throw.result.remaining,
            on_ring_edge: throw.classification.on_ring_edge,
            on_sector_edge: throw.classification.on_sector_edge,
        }
    }
}

/// Result of replaying a [`SessionScript`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Steps executed, including the failing one if any.
    pub steps_run: usize,
    /// Frame and blob steps seen.
    pub frames: usize,
    /// Frames ignored because the engine was not calibrated yet.
    pub idle_frames: usize,
    /// Impact candidates suppressed by the debouncer.
    pub debounced: usize,
    /// Zone radii of the calibration in force at the end.
    #[serde(default)]
    pub zones: Option<ZoneRadii>,
    pub throws: Vec<ThrowRecord>,
    pub final_total: i32,
    pub remaining: i32,
    pub finished: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SessionReport {
    /// Record an engine error; replay stops at the first one.
    pub fn set_error(&mut self, err: EngineError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
