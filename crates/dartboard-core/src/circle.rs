//! Picking the board outline among circle-detector candidates.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::calibration::{Calibration, CalibrationError, CalibrationParams};

/// One circle reported by an upstream (Hough-style) detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleCandidate {
    pub center: Point2<f64>,
    pub radius: f64,
    /// Detector confidence (accumulator votes or similar); higher is better.
    #[serde(default)]
    pub score: f64,
}

impl CircleCandidate {
    pub fn new(center: Point2<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            score: 0.0,
        }
    }

    fn is_finite(&self) -> bool {
        self.center.x.is_finite()
            && self.center.y.is_finite()
            && self.radius.is_finite()
            && self.score.is_finite()
    }

    /// Fit a calibration from this circle.
    pub fn to_calibration(
        &self,
        params: &CalibrationParams,
    ) -> Result<Calibration, CalibrationError> {
        Calibration::fit_with(self.center, self.radius, params)
    }
}

/// Accepted radius window for the board outline, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleSearchParams {
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for CircleSearchParams {
    fn default() -> Self {
        Self {
            min_radius: 135.0,
            max_radius: 450.0,
        }
    }
}

impl CircleSearchParams {
    #[inline]
    pub fn accepts(&self, radius: f64) -> bool {
        self.min_radius <= radius && radius <= self.max_radius
    }
}

/// Best-scoring candidate inside the radius window; ties keep the earlier one.
pub fn select_board_circle(
    candidates: &[CircleCandidate],
    params: &CircleSearchParams,
) -> Option<CircleCandidate> {
    let mut best: Option<CircleCandidate> = None;
    for cand in candidates
        .iter()
        .filter(|c| c.is_finite() && params.accepts(c.radius))
    {
        if best.map(|b| cand.score > b.score).unwrap_or(true) {
            best = Some(*cand);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(x: f64, y: f64, r: f64, score: f64) -> CircleCandidate {
        CircleCandidate {
            center: Point2::new(x, y),
            radius: r,
            score,
        }
    }

    #[test]
    fn picks_highest_score_inside_window() {
        let candidates = [
            cand(10.0, 10.0, 50.0, 99.0),
            cand(320.0, 240.0, 200.0, 3.0),
            cand(300.0, 250.0, 210.0, 7.0),
            cand(0.0, 0.0, 900.0, 100.0),
        ];
        let best = select_board_circle(&candidates, &CircleSearchParams::default()).expect("one");
        assert_eq!(best, candidates[2]);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let candidates = [cand(1.0, 1.0, 200.0, 0.0), cand(2.0, 2.0, 200.0, 0.0)];
        let best = select_board_circle(&candidates, &CircleSearchParams::default()).expect("one");
        assert_eq!(best.center, Point2::new(1.0, 1.0));
    }

    #[test]
    fn window_bounds_are_inclusive_and_nan_is_skipped() {
        let params = CircleSearchParams {
            min_radius: 100.0,
            max_radius: 200.0,
        };
        assert!(params.accepts(100.0));
        assert!(params.accepts(200.0));
        let candidates = [cand(f64::NAN, 0.0, 150.0, 10.0), cand(0.0, 0.0, 99.9, 1.0)];
        assert!(select_board_circle(&candidates, &params).is_none());
    }

    #[test]
    fn selected_circle_fits_calibration() {
        let c = cand(320.0, 240.0, 200.0, 1.0);
        let cal = c.to_calibration(&CalibrationParams::default()).expect("fit");
        assert_eq!(cal.radius(), 200.0);
        assert_eq!(cal.center(), Point2::new(320.0, 240.0));
    }
}
