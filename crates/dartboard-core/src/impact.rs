//! Impact points and their extraction from segmented blobs.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Candidate dart position observed in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactPoint {
    pub position: Point2<f64>,
    /// Capture time in seconds on the caller's clock.
    pub timestamp_s: f64,
}

/// Contour blob summary: area plus raw image moments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub area: f64,
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Blob {
    /// Centroid `(m10 / m00, m01 / m00)`, `None` for degenerate moments.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        if self.m00 == 0.0 || !self.m00.is_finite() {
            return None;
        }
        let p = Point2::new(self.m10 / self.m00, self.m01 / self.m00);
        (p.x.is_finite() && p.y.is_finite()).then_some(p)
    }
}

/// Blob filtering for impact extraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactSelectParams {
    /// The largest blob must be strictly larger than this to count.
    pub min_area: f64,
    /// Origin of the region of interest the blobs were measured in; added
    /// back to the centroid to return frame coordinates.
    pub roi_origin: Option<[f64; 2]>,
}

impl Default for ImpactSelectParams {
    fn default() -> Self {
        Self {
            min_area: 20.0,
            roi_origin: None,
        }
    }
}

/// Reduce one frame's blobs to a single impact candidate.
///
/// Only the largest blob is considered; if it is too small or its moments
/// are degenerate the frame has no candidate.
pub fn select_impact(blobs: &[Blob], params: &ImpactSelectParams) -> Option<Point2<f64>> {
    let largest = blobs
        .iter()
        .filter(|b| b.area.is_finite())
        .max_by(|a, b| a.area.total_cmp(&b.area))?;
    if largest.area <= params.min_area {
        return None;
    }
    let centroid = largest.centroid()?;
    let offset = params
        .roi_origin
        .map(|[x, y]| Vector2::new(x, y))
        .unwrap_or_else(Vector2::zeros);
    Some(centroid + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_blob(cx: f64, cy: f64, area: f64) -> Blob {
        Blob {
            area,
            m00: area,
            m10: cx * area,
            m01: cy * area,
        }
    }

    #[test]
    fn largest_blob_wins() {
        let blobs = [square_blob(5.0, 5.0, 30.0), square_blob(100.0, 80.0, 400.0)];
        let p = select_impact(&blobs, &ImpactSelectParams::default()).expect("impact");
        assert_eq!(p, Point2::new(100.0, 80.0));
    }

    #[test]
    fn small_largest_blob_yields_nothing() {
        let blobs = [square_blob(5.0, 5.0, 20.0), square_blob(9.0, 9.0, 12.0)];
        assert!(select_impact(&blobs, &ImpactSelectParams::default()).is_none());
        assert!(select_impact(&[], &ImpactSelectParams::default()).is_none());
    }

    #[test]
    fn zero_moment_blob_has_no_centroid() {
        let blob = Blob {
            area: 50.0,
            m00: 0.0,
            m10: 1.0,
            m01: 1.0,
        };
        assert!(blob.centroid().is_none());
        assert!(select_impact(&[blob], &ImpactSelectParams::default()).is_none());
    }

    #[test]
    fn roi_origin_shifts_back_to_frame() {
        let params = ImpactSelectParams {
            roi_origin: Some([100.0, 50.0]),
            ..ImpactSelectParams::default()
        };
        let p = select_impact(&[square_blob(10.0, 20.0, 64.0)], &params).expect("impact");
        assert_eq!(p, Point2::new(110.0, 70.0));
    }
}
