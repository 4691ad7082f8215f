//! Per-ship commands emitted once per turn.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{PlanetId, ShipId};

/// A single low-level command for one ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    /// Accelerate along a heading.
    Thrust {
        /// Commanded ship.
        ship: ShipId,
        /// Heading in whole degrees, `[0, 360)`.
        angle_deg: i32,
        /// Speed for this turn.
        magnitude: i32,
    },
    /// Begin docking to a planet.
    Dock {
        /// Commanded ship.
        ship: ShipId,
        /// Planet to dock to.
        planet: PlanetId,
    },
    /// Begin undocking.
    Undock {
        /// Commanded ship.
        ship: ShipId,
    },
}

impl Move {
    /// The ship this command addresses.
    #[must_use]
    pub const fn ship(&self) -> ShipId {
        match self {
            Self::Thrust { ship, .. } | Self::Dock { ship, .. } | Self::Undock { ship } => *ship,
        }
    }

    /// The same heading with zero magnitude; other commands are returned as-is.
    #[must_use]
    pub const fn halted(self) -> Self {
        match self {
            Self::Thrust {
                ship, angle_deg, ..
            } => Self::Thrust {
                ship,
                angle_deg,
                magnitude: 0,
            },
            other => other,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thrust {
                ship,
                angle_deg,
                magnitude,
            } => write!(f, "t {ship} {magnitude} {angle_deg}"),
            Self::Dock { ship, planet } => write!(f, "d {ship} {planet}"),
            Self::Undock { ship } => write!(f, "u {ship}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_encoding() {
        let thrust = Move::Thrust {
            ship: ShipId(4),
            angle_deg: 270,
            magnitude: 7,
        };
        assert_eq!(thrust.to_string(), "t 4 7 270");
        assert_eq!(
            Move::Dock {
                ship: ShipId(4),
                planet: PlanetId(2)
            }
            .to_string(),
            "d 4 2"
        );
        assert_eq!(Move::Undock { ship: ShipId(9) }.to_string(), "u 9");
    }

    #[test]
    fn test_halted_keeps_heading() {
        let thrust = Move::Thrust {
            ship: ShipId(1),
            angle_deg: 45,
            magnitude: 7,
        };
        assert_eq!(
            thrust.halted(),
            Move::Thrust {
                ship: ShipId(1),
                angle_deg: 45,
                magnitude: 0
            }
        );
        let dock = Move::Dock {
            ship: ShipId(1),
            planet: PlanetId(0),
        };
        assert_eq!(dock.halted(), dock);
    }
}
