//! Zone hit -> points.

use dartboard_core::{Ring, SectorRing, TerminalRing, ThrowInputError, ZoneHit};
use serde::{Deserialize, Serialize};

pub const BULL_POINTS: u32 = 50;
pub const IRIS_POINTS: u32 = 25;

/// Points scored by one accepted dart.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Printed sector value (1..=20); `None` for bull, iris and misses.
    pub sector: Option<u8>,
    pub ring: Ring,
    pub value: u32,
}

impl ScoreEvent {
    /// Build an event from loosely typed parts supplied by another component.
    pub fn from_parts(sector_index: Option<usize>, ring: Ring) -> Result<Self, ThrowInputError> {
        Ok(resolve_score(ZoneHit::from_parts(sector_index, ring)?))
    }

    #[inline]
    pub fn can_finish(&self) -> bool {
        self.ring.can_finish()
    }
}

/// Score a classified hit.
pub fn resolve_score(hit: ZoneHit) -> ScoreEvent {
    match hit {
        ZoneHit::Terminal { ring } => {
            let (ring, value) = match ring {
                TerminalRing::Bull => (Ring::Bull, BULL_POINTS),
                TerminalRing::Iris => (Ring::Iris, IRIS_POINTS),
                TerminalRing::OutOfBounds => (Ring::OutOfBounds, 0),
            };
            ScoreEvent {
                sector: None,
                ring,
                value,
            }
        }
        ZoneHit::Sector { sector, ring } => ScoreEvent {
            sector: Some(sector.value()),
            ring: match ring {
                SectorRing::Single => Ring::Single,
                SectorRing::Double => Ring::Double,
                SectorRing::Triple => Ring::Triple,
            },
            value: u32::from(sector.value()) * ring.multiplier(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dartboard_core::{SectorIndex, SECTOR_ORDER};

    fn sector(idx: usize) -> SectorIndex {
        SectorIndex::try_from(idx).expect("index")
    }

    #[test]
    fn terminal_rings_ignore_sector() {
        let bull = resolve_score(ZoneHit::Terminal {
            ring: TerminalRing::Bull,
        });
        assert_eq!(bull.value, 50);
        assert_eq!(bull.sector, None);
        let iris = resolve_score(ZoneHit::Terminal {
            ring: TerminalRing::Iris,
        });
        assert_eq!(iris.value, 25);
        let miss = resolve_score(ZoneHit::Terminal {
            ring: TerminalRing::OutOfBounds,
        });
        assert_eq!(miss.value, 0);
        assert_eq!(miss.ring, Ring::OutOfBounds);
    }

    #[test]
    fn multipliers_apply_to_sector_value() {
        for (idx, &printed) in SECTOR_ORDER.iter().enumerate() {
            let base = u32::from(printed);
            for (ring, mul) in [
                (SectorRing::Single, 1),
                (SectorRing::Double, 2),
                (SectorRing::Triple, 3),
            ] {
                let ev = resolve_score(ZoneHit::Sector {
                    sector: sector(idx),
                    ring,
                });
                assert_eq!(ev.value, base * mul);
                assert_eq!(ev.sector, Some(printed));
            }
        }
    }

    #[test]
    fn treble_twenty_and_double_five() {
        let t20 = ScoreEvent::from_parts(Some(0), Ring::Triple).expect("t20");
        assert_eq!(t20.value, 60);
        assert!(!t20.can_finish());
        let d5 = ScoreEvent::from_parts(Some(19), Ring::Double).expect("d5");
        assert_eq!(d5.value, 10);
        assert!(d5.can_finish());
    }

    #[test]
    fn malformed_parts_are_rejected() {
        assert!(ScoreEvent::from_parts(Some(20), Ring::Single).is_err());
        assert!(ScoreEvent::from_parts(None, Ring::Double).is_err());
        assert!(ScoreEvent::from_parts(Some(1), Ring::Bull).is_err());
    }
}
