//! Core geometry for camera-based dart scoring.
//!
//! This crate is purely geometric. It knows nothing about cameras or image
//! types: a board is a fitted circle, a throw is a point.
//!
//! - [`Calibration`]: fitted outer circle and the six zone radii derived from it.
//! - [`classify_point`]: point -> sector and ring.
//! - [`select_board_circle`] / [`select_impact`]: reduce detector output
//!   (circle candidates, contour blobs) to the data the scorer needs.

mod calibration;
mod circle;
mod impact;
mod logger;
mod proportions;
mod zone;

pub use calibration::{Calibration, CalibrationError, CalibrationParams};
pub use circle::{select_board_circle, CircleCandidate, CircleSearchParams};
pub use impact::{select_impact, Blob, ImpactPoint, ImpactSelectParams};
pub use proportions::{BoardProportions, RadiusRounding, ZoneRadii, REFERENCE_DIAMETER};
pub use zone::{
    classify_point, offset_angle_deg, Classification, Ring, SectorIndex, SectorRing,
    TerminalRing, ThrowInputError, ZoneHit, ANGLE_OFFSET_DEG, SECTOR_COUNT, SECTOR_ORDER,
    SECTOR_SPAN_DEG,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, parse_level};
