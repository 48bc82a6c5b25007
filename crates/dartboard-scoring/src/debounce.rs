//! Time-based suppression of repeated impact candidates.
//!
//! A dart stays in the board for many frames after it lands. Every frame
//! yields the same candidate, so only the first one inside a quiet window is
//! forwarded for scoring.

use dartboard_core::ImpactPoint;
use log::trace;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_INTERVAL_S: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceParams {
    /// Minimum time between two accepted impacts, in seconds.
    pub min_interval_s: f64,
}

impl Default for DebounceParams {
    fn default() -> Self {
        Self {
            min_interval_s: DEFAULT_MIN_INTERVAL_S,
        }
    }
}

impl DebounceParams {
    /// Finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.min_interval_s.is_finite() && self.min_interval_s >= 0.0
    }
}

/// Forwards a candidate only if enough time passed since the last accepted one.
#[derive(Clone, Debug)]
pub struct ImpactDebouncer {
    params: DebounceParams,
    last_accepted: Option<ImpactPoint>,
}

impl ImpactDebouncer {
    pub fn new(params: DebounceParams) -> Self {
        Self {
            params,
            last_accepted: None,
        }
    }

    #[inline]
    pub fn params(&self) -> &DebounceParams {
        &self.params
    }

    #[inline]
    pub fn last_accepted(&self) -> Option<&ImpactPoint> {
        self.last_accepted.as_ref()
    }

    /// Forget the last accepted impact; the next candidate passes.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }

    /// Offer a candidate seen at `timestamp_s`.
    ///
    /// The first candidate after construction or [`reset`](Self::reset) is
    /// always accepted. A later one passes when at least `min_interval_s`
    /// elapsed since the previous accepted impact. Suppressed candidates do
    /// not move the window. Non-finite timestamps and timestamps before the
    /// last accepted impact are dropped.
    pub fn offer(&mut self, position: Point2<f64>, timestamp_s: f64) -> Option<ImpactPoint> {
        if !timestamp_s.is_finite() {
            trace!("impact with non-finite timestamp dropped");
            return None;
        }
        if let Some(last) = &self.last_accepted {
            let elapsed = timestamp_s - last.timestamp_s;
            if elapsed < 0.0 || elapsed < self.params.min_interval_s {
                trace!(
                    "impact at t={timestamp_s:.3}s suppressed ({elapsed:.3}s since last)"
                );
                return None;
            }
        }
        let impact = ImpactPoint {
            position,
            timestamp_s,
        };
        self.last_accepted = Some(impact);
        Some(impact)
    }
}

impl Default for ImpactDebouncer {
    fn default() -> Self {
        Self::new(DebounceParams::default())
    }
}
