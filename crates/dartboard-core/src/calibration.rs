//! Board calibration: the fitted outer circle and the zone radii derived from it.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::proportions::{BoardProportions, RadiusRounding, ZoneRadii};
use crate::zone::{ANGLE_OFFSET_DEG, SECTOR_COUNT, SECTOR_SPAN_DEG};

/// Calibration validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("board radius must be finite and > 0 (got {radius})")]
    InvalidRadius { radius: f64 },
    #[error("board center must be finite (got ({x}, {y}))")]
    InvalidCenter { x: f64, y: f64 },
    #[error("board proportions must be finite, positive and strictly increasing")]
    InvalidProportions,
    #[error("zone radii collapse for radius {radius} (boundaries must be strictly increasing)")]
    CollapsedZones { radius: f64 },
}

/// How a fitted circle is turned into zone radii.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    pub proportions: BoardProportions,
    pub rounding: RadiusRounding,
}

/// A fitted board: outer circle plus precomputed zone radii.
///
/// Immutable once built. Re-calibrating means building a new value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Calibration {
    center: Point2<f64>,
    radius: f64,
    params: CalibrationParams,
    zones: ZoneRadii,
}

impl Calibration {
    /// Fit with the standard board proportions and exact boundaries.
    pub fn fit(center: Point2<f64>, radius: f64) -> Result<Self, CalibrationError> {
        Self::fit_with(center, radius, &CalibrationParams::default())
    }

    /// Validate the circle and derive zone radii using `params`.
    pub fn fit_with(
        center: Point2<f64>,
        radius: f64,
        params: &CalibrationParams,
    ) -> Result<Self, CalibrationError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CalibrationError::InvalidRadius { radius });
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(CalibrationError::InvalidCenter {
                x: center.x,
                y: center.y,
            });
        }
        params.proportions.validate()?;

        let zones = ZoneRadii::from_radius(radius, &params.proportions, params.rounding);
        if !zones.is_strictly_increasing() {
            return Err(CalibrationError::CollapsedZones { radius });
        }

        Ok(Self {
            center,
            radius,
            params: *params,
            zones,
        })
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    /// Detected outer radius in pixels.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn params(&self) -> &CalibrationParams {
        &self.params
    }

    /// The six zone-boundary radii, centre outwards.
    #[inline]
    pub fn zone_radii(&self) -> ZoneRadii {
        self.zones
    }

    /// End points of the 20 sector dividers on the outer circle.
    ///
    /// Dividers sit at `9 + 18k` degrees from the image +x axis (y pointing
    /// down), i.e. on the edges the classifier uses after its angle offset.
    pub fn sector_spokes(&self) -> [Point2<f64>; SECTOR_COUNT] {
        let first = (ANGLE_OFFSET_DEG % SECTOR_SPAN_DEG).to_radians();
        let step = SECTOR_SPAN_DEG.to_radians();
        std::array::from_fn(|k| {
            let (sin_t, cos_t) = (first + step * k as f64).sin_cos();
            Point2::new(
                self.center.x + self.radius * cos_t,
                self.center.y + self.radius * sin_t,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fit_rejects_non_positive_radius() {
        let center = Point2::new(320.0, 240.0);
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Calibration::fit(center, radius).expect_err("must fail");
            assert!(matches!(err, CalibrationError::InvalidRadius { .. }));
        }
    }

    #[test]
    fn fit_rejects_non_finite_center() {
        let err = Calibration::fit(Point2::new(f64::NAN, 1.0), 100.0).expect_err("must fail");
        assert!(matches!(err, CalibrationError::InvalidCenter { .. }));
    }

    #[test]
    fn fit_rejects_collapsed_rounded_zones() {
        let params = CalibrationParams {
            rounding: RadiusRounding::NearestPixel,
            ..CalibrationParams::default()
        };
        let err = Calibration::fit_with(Point2::new(0.0, 0.0), 2.0, &params).expect_err("fail");
        assert_eq!(err, CalibrationError::CollapsedZones { radius: 2.0 });
    }

    #[test]
    fn zone_radii_scale_linearly() {
        let small = Calibration::fit(Point2::new(0.0, 0.0), 100.0).expect("fit");
        let large = Calibration::fit(Point2::new(0.0, 0.0), 300.0).expect("fit");
        for (a, b) in small
            .zone_radii()
            .as_array()
            .iter()
            .zip(large.zone_radii().as_array())
        {
            assert_relative_eq!(a * 3.0, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn spokes_lie_on_outer_circle_at_sector_edges() {
        let cal = Calibration::fit(Point2::new(320.0, 240.0), 200.0).expect("fit");
        let spokes = cal.sector_spokes();
        for (k, p) in spokes.iter().enumerate() {
            let d = (*p - cal.center()).norm();
            assert_relative_eq!(d, 200.0, epsilon = 1e-9);
            let deg = (p.y - 240.0).atan2(p.x - 320.0).to_degrees().rem_euclid(360.0);
            assert_relative_eq!(deg, 9.0 + 18.0 * k as f64, epsilon = 1e-9);
        }
    }
}
