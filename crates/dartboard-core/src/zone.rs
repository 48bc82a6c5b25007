//! Point -> (sector, ring) classification.
//!
//! Angles are measured with `atan2` in image coordinates (y down) and rotated
//! by [`ANGLE_OFFSET_DEG`] so that the "20" wedge occupies `[0, 18)` degrees.
//! Ring bands are open intervals tested centre-outwards; a distance that lands
//! exactly on a boundary matches none of them and is scored as a single.

use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::proportions::ZoneRadii;

pub const SECTOR_COUNT: usize = 20;

/// Angular width of one sector.
pub const SECTOR_SPAN_DEG: f64 = 360.0 / SECTOR_COUNT as f64;

/// Half a sector plus the five-sector rotation from atan2's zero (pointing
/// right) to the top of the board.
pub const ANGLE_OFFSET_DEG: f64 = SECTOR_SPAN_DEG / 2.0 + 5.0 * SECTOR_SPAN_DEG;

/// Physical sector values, clockwise from the top.
pub const SECTOR_ORDER: [u8; SECTOR_COUNT] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Malformed throw data handed over by an upstream collaborator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ThrowInputError {
    #[error("impact point must be finite (got ({x}, {y}))")]
    NonFinitePoint { x: f64, y: f64 },
    #[error("sector index {index} out of range (expected 0..20)")]
    SectorOutOfRange { index: usize },
    #[error("ring {ring:?} needs a sector")]
    MissingSector { ring: Ring },
    #[error("ring {ring:?} does not take a sector (got index {index})")]
    UnexpectedSector { ring: Ring, index: usize },
}

/// Index into [`SECTOR_ORDER`], guaranteed `< SECTOR_COUNT`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SectorIndex(u8);

impl SectorIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Printed value of the wedge (1..=20).
    #[inline]
    pub fn value(self) -> u8 {
        SECTOR_ORDER[self.index()]
    }

    /// Sector containing an already offset angle in degrees.
    ///
    /// The angle is wrapped into `[0, 360)` first; an angle exactly on an
    /// edge belongs to the sector that starts there.
    pub fn from_offset_angle(angle_deg: f64) -> Self {
        let wrapped = angle_deg.rem_euclid(360.0);
        let idx = (wrapped / SECTOR_SPAN_DEG).floor() as usize;
        // rem_euclid may round a tiny negative up to exactly 360.0
        Self((idx % SECTOR_COUNT) as u8)
    }

    /// Whether an offset angle sits exactly on a wedge edge, where
    /// [`from_offset_angle`](Self::from_offset_angle) picks the later wedge.
    pub fn is_edge_angle(angle_deg: f64) -> bool {
        angle_deg.is_finite() && angle_deg.rem_euclid(SECTOR_SPAN_DEG) == 0.0
    }
}

impl TryFrom<usize> for SectorIndex {
    type Error = ThrowInputError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index < SECTOR_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(ThrowInputError::SectorOutOfRange { index })
        }
    }
}

impl From<SectorIndex> for usize {
    fn from(value: SectorIndex) -> Self {
        value.index()
    }
}

/// Flat ring label, as reported in score events.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ring {
    Bull,
    Iris,
    Triple,
    Double,
    Single,
    OutOfBounds,
}

impl Ring {
    /// Bull and double are the only rings allowed to finish a leg.
    #[inline]
    pub fn can_finish(self) -> bool {
        matches!(self, Ring::Bull | Ring::Double)
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Ring::Bull | Ring::Iris | Ring::OutOfBounds)
    }
}

/// Rings whose score does not depend on the sector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalRing {
    Bull,
    Iris,
    OutOfBounds,
}

/// Rings that multiply the sector value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorRing {
    Single,
    Double,
    Triple,
}

impl SectorRing {
    #[inline]
    pub fn multiplier(self) -> u32 {
        match self {
            SectorRing::Single => 1,
            SectorRing::Double => 2,
            SectorRing::Triple => 3,
        }
    }
}

/// Where a dart landed, with the sector only present when it matters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneHit {
    Terminal { ring: TerminalRing },
    Sector { sector: SectorIndex, ring: SectorRing },
}

impl ZoneHit {
    /// Rebuild a hit from loosely typed parts, rejecting inconsistent input.
    pub fn from_parts(sector: Option<usize>, ring: Ring) -> Result<Self, ThrowInputError> {
        let terminal = match ring {
            Ring::Bull => Some(TerminalRing::Bull),
            Ring::Iris => Some(TerminalRing::Iris),
            Ring::OutOfBounds => Some(TerminalRing::OutOfBounds),
            Ring::Single | Ring::Double | Ring::Triple => None,
        };
        match (terminal, sector) {
            (Some(_), Some(index)) => Err(ThrowInputError::UnexpectedSector { ring, index }),
            (Some(ring), None) => Ok(ZoneHit::Terminal { ring }),
            (None, None) => Err(ThrowInputError::MissingSector { ring }),
            (None, Some(index)) => {
                let sector = SectorIndex::try_from(index)?;
                let ring = match ring {
                    Ring::Double => SectorRing::Double,
                    Ring::Triple => SectorRing::Triple,
                    _ => SectorRing::Single,
                };
                Ok(ZoneHit::Sector { sector, ring })
            }
        }
    }

    pub fn ring(&self) -> Ring {
        match *self {
            ZoneHit::Terminal { ring } => match ring {
                TerminalRing::Bull => Ring::Bull,
                TerminalRing::Iris => Ring::Iris,
                TerminalRing::OutOfBounds => Ring::OutOfBounds,
            },
            ZoneHit::Sector { ring, .. } => match ring {
                SectorRing::Single => Ring::Single,
                SectorRing::Double => Ring::Double,
                SectorRing::Triple => Ring::Triple,
            },
        }
    }

    /// Printed sector value, `None` for terminal rings.
    pub fn sector_value(&self) -> Option<u8> {
        match self {
            ZoneHit::Terminal { .. } => None,
            ZoneHit::Sector { sector, .. } => Some(sector.value()),
        }
    }
}

/// Classification of one point plus the measurements behind it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub hit: ZoneHit,
    /// Distance from the board centre in pixels.
    pub distance: f64,
    /// Angle after the sector offset, in `[0, 360)`.
    pub angle_deg: f64,
    /// Distance coincides with a zone boundary and fell through to single.
    pub on_ring_edge: bool,
    /// Sector ring hit exactly on a wedge edge.
    #[serde(default)]
    pub on_sector_edge: bool,
}

/// Offset angle of `point` around `center`, wrapped into `[0, 360)`.
pub fn offset_angle_deg(point: Point2<f64>, center: Point2<f64>) -> f64 {
    let raw = (point.y - center.y).atan2(point.x - center.x).to_degrees();
    (raw + ANGLE_OFFSET_DEG).rem_euclid(360.0)
}

/// Radial band for `distance`, with the sector attached for sector rings.
fn classify_distance(distance: f64, zones: &ZoneRadii, sector: SectorIndex) -> ZoneHit {
    if distance < zones.bull {
        ZoneHit::Terminal {
            ring: TerminalRing::Bull,
        }
    } else if zones.bull < distance && distance < zones.iris {
        ZoneHit::Terminal {
            ring: TerminalRing::Iris,
        }
    } else if zones.triple_inner < distance && distance < zones.triple_outer {
        ZoneHit::Sector {
            sector,
            ring: SectorRing::Triple,
        }
    } else if zones.double_inner < distance && distance < zones.double_outer {
        ZoneHit::Sector {
            sector,
            ring: SectorRing::Double,
        }
    } else if distance > zones.double_outer {
        ZoneHit::Terminal {
            ring: TerminalRing::OutOfBounds,
        }
    } else {
        ZoneHit::Sector {
            sector,
            ring: SectorRing::Single,
        }
    }
}

/// Classify an impact point against a calibration.
pub fn classify_point(
    point: Point2<f64>,
    calibration: &Calibration,
) -> Result<Classification, ThrowInputError> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(ThrowInputError::NonFinitePoint {
            x: point.x,
            y: point.y,
        });
    }

    let center = calibration.center();
    let zones = calibration.zone_radii();
    let distance = (point - center).norm();
    let angle_deg = offset_angle_deg(point, center);
    let sector = SectorIndex::from_offset_angle(angle_deg);

    let hit = classify_distance(distance, &zones, sector);
    let on_ring_edge = distance > 0.0 && zones.is_boundary(distance);
    if on_ring_edge {
        debug!("impact at distance {distance} lies on a zone boundary; scored as {hit:?}");
    }
    let on_sector_edge =
        matches!(hit, ZoneHit::Sector { .. }) && SectorIndex::is_edge_angle(angle_deg);
    if on_sector_edge {
        debug!("impact angle {angle_deg} lies on a sector edge; scored as {hit:?}");
    }
    debug!("distance from center: {distance:.3}; angle: {angle_deg:.3} -> {hit:?}");

    Ok(Classification {
        hit,
        distance,
        angle_deg,
        on_ring_edge,
        on_sector_edge,
    })
}
