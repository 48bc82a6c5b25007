//! Physical dartboard proportions and the zone radii derived from them.
//!
//! All ratios are relative to the *detected* outer radius of the board, which
//! is the edge of the 451 mm reference board (number ring included), not the
//! outer edge of the double band.

use serde::{Deserialize, Serialize};

use crate::CalibrationError;

/// Diameter of the reference board the ratios are expressed against.
pub const REFERENCE_DIAMETER: f64 = 451.0;

const REFERENCE_HALF: f64 = REFERENCE_DIAMETER / 2.0;

/// Ratio of each zone boundary to the detected outer radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardProportions {
    pub bull: f64,
    pub iris: f64,
    pub triple_inner: f64,
    pub triple_outer: f64,
    pub double_inner: f64,
    pub double_outer: f64,
}

impl Default for BoardProportions {
    fn default() -> Self {
        Self {
            bull: 12.7 / REFERENCE_DIAMETER,
            iris: 32.0 / REFERENCE_DIAMETER,
            triple_inner: 99.0 / REFERENCE_HALF,
            triple_outer: 107.0 / REFERENCE_HALF,
            double_inner: 162.0 / REFERENCE_HALF,
            double_outer: 170.0 / REFERENCE_HALF,
        }
    }
}

impl BoardProportions {
    /// Ratios ordered from the centre outwards.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.bull,
            self.iris,
            self.triple_inner,
            self.triple_outer,
            self.double_inner,
            self.double_outer,
        ]
    }

    /// Check that every ratio is finite, positive and strictly increasing.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let ratios = self.as_array();
        if ratios.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(CalibrationError::InvalidProportions);
        }
        if !is_strictly_increasing(&ratios) {
            return Err(CalibrationError::InvalidProportions);
        }
        Ok(())
    }
}

/// How zone boundaries are quantised after scaling by the radius.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusRounding {
    /// Keep the exact linear function of the radius.
    #[default]
    Exact,
    /// Round each boundary to the nearest whole pixel.
    NearestPixel,
}

impl RadiusRounding {
    #[inline]
    fn apply(self, value: f64) -> f64 {
        match self {
            RadiusRounding::Exact => value,
            RadiusRounding::NearestPixel => value.round(),
        }
    }
}

/// Zone-boundary radii in pixels, ordered from the centre outwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneRadii {
    pub bull: f64,
    pub iris: f64,
    pub triple_inner: f64,
    pub triple_outer: f64,
    pub double_inner: f64,
    pub double_outer: f64,
}

impl ZoneRadii {
    /// Scale `proportions` by the detected outer `radius`.
    pub fn from_radius(
        radius: f64,
        proportions: &BoardProportions,
        rounding: RadiusRounding,
    ) -> Self {
        let scale = |ratio: f64| rounding.apply(ratio * radius);
        Self {
            bull: scale(proportions.bull),
            iris: scale(proportions.iris),
            triple_inner: scale(proportions.triple_inner),
            triple_outer: scale(proportions.triple_outer),
            double_inner: scale(proportions.double_inner),
            double_outer: scale(proportions.double_outer),
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [
            self.bull,
            self.iris,
            self.triple_inner,
            self.triple_outer,
            self.double_inner,
            self.double_outer,
        ]
    }

    pub fn is_strictly_increasing(&self) -> bool {
        is_strictly_increasing(&self.as_array())
    }

    /// True if `distance` coincides with one of the boundaries.
    pub fn is_boundary(&self, distance: f64) -> bool {
        self.as_array().contains(&distance)
    }
}

fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
