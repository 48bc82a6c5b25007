//! One-shot helpers: zone table for a radius, score for a single point.

use dartboard_core::{
    classify_point, Calibration, CalibrationError, CalibrationParams, Classification,
    ThrowInputError, ZoneRadii,
};
use dartboard_scoring::{resolve_score, ScoreEvent};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QuickError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    ThrowInput(#[from] ThrowInputError),
    #[error("expected `x,y`, got `{0}`")]
    BadPair(String),
}

/// Zone radii and sector spokes for a board of `radius` pixels centred at
/// the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneTable {
    pub radius: f64,
    pub zones: ZoneRadii,
    pub spokes: Vec<[f64; 2]>,
}

/// Classification and score of a single point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointScore {
    pub center: [f64; 2],
    pub radius: f64,
    pub point: [f64; 2],
    pub classification: Classification,
    pub score: ScoreEvent,
}

/// Parse `"x,y"` (whitespace tolerated) into a point.
pub fn parse_pair(raw: &str) -> Result<Point2<f64>, QuickError> {
    let bad = || QuickError::BadPair(raw.to_string());
    let (x, y) = raw.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    Ok(Point2::new(x, y))
}

pub fn zone_table(radius: f64, params: &CalibrationParams) -> Result<ZoneTable, QuickError> {
    let cal = Calibration::fit_with(Point2::origin(), radius, params)?;
    Ok(ZoneTable {
        radius,
        zones: cal.zone_radii(),
        spokes: cal.sector_spokes().iter().map(|p| [p.x, p.y]).collect(),
    })
}

pub fn score_point(
    center: Point2<f64>,
    radius: f64,
    point: Point2<f64>,
    params: &CalibrationParams,
) -> Result<PointScore, QuickError> {
    let cal = Calibration::fit_with(center, radius, params)?;
    let classification = classify_point(point, &cal)?;
    Ok(PointScore {
        center: [center.x, center.y],
        radius,
        point: [point.x, point.y],
        classification,
        score: resolve_score(classification.hit),
    })
}
