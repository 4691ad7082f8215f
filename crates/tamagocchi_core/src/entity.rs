//! Observed game entities: ships and planets.
//!
//! Entities are plain snapshot data rebuilt every turn from the engine's
//! map line. They carry no behavior beyond geometric and ownership queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Position;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Player identifier assigned by the engine.
    PlayerId
);
id_type!(
    /// Ship identifier, stable for the ship's lifetime.
    ShipId
);
id_type!(
    /// Planet identifier.
    PlanetId
);

/// Docking state of a ship as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DockingStatus {
    /// Free to move.
    #[default]
    Undocked,
    /// Docking in progress.
    Docking,
    /// Docked and producing.
    Docked,
    /// Undocking in progress.
    Undocking,
}

impl DockingStatus {
    /// Decode the engine's numeric docking status.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Undocked),
            1 => Some(Self::Docking),
            2 => Some(Self::Docked),
            3 => Some(Self::Undocking),
            _ => None,
        }
    }
}

/// A ship snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Ship id.
    pub id: ShipId,
    /// Owning player.
    pub owner: PlayerId,
    /// Current position.
    pub position: Position,
    /// Collision radius.
    pub radius: f64,
    /// Remaining hit points.
    pub health: u32,
    /// Current docking state.
    pub docking_status: DockingStatus,
    /// Planet the ship is docked (or docking) to, if any.
    pub docked_planet: Option<PlanetId>,
    /// Turns of docking progress remaining.
    pub docking_progress: u32,
    /// Turns until the weapon can fire again.
    pub weapon_cooldown: u32,
}

impl Ship {
    /// Distance between ship centers.
    #[must_use]
    pub fn distance_to(&self, other: &Ship) -> f64 {
        self.position.distance_to(other.position)
    }

    /// Distance from this ship's center to a point.
    #[must_use]
    pub fn distance_to_point(&self, point: Position) -> f64 {
        self.position.distance_to(point)
    }

    /// Whether the ship is free to thrust.
    #[must_use]
    pub fn is_undocked(&self) -> bool {
        self.docking_status == DockingStatus::Undocked
    }

    /// Whether the ship is attached to a planet in any phase of docking.
    #[must_use]
    pub fn is_docked(&self) -> bool {
        self.docking_status != DockingStatus::Undocked
    }
}

/// A planet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Planet id.
    pub id: PlanetId,
    /// Center position.
    pub position: Position,
    /// Planet radius.
    pub radius: f64,
    /// Remaining hit points.
    pub health: u32,
    /// Maximum number of simultaneously docked ships.
    pub docking_spots: u32,
    /// Production accumulated towards the next ship.
    pub current_production: u32,
    /// Production left to extract.
    pub remaining_production: u32,
    /// Owning player, if any.
    pub owner: Option<PlayerId>,
    /// Ships currently docked, in engine order.
    pub docked_ships: Vec<ShipId>,
}

impl Planet {
    /// Whether any player owns the planet.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Whether the planet is owned by someone other than `player`.
    #[must_use]
    pub fn is_hostile_to(&self, player: PlayerId) -> bool {
        self.owner.is_some_and(|owner| owner != player)
    }

    /// Whether every docking spot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.docked_ships.len() >= self.docking_spots as usize
    }

    /// Number of docked ships.
    #[must_use]
    pub fn docked_count(&self) -> usize {
        self.docked_ships.len()
    }

    /// Distance from the planet's center to a point.
    #[must_use]
    pub fn distance_to_point(&self, point: Position) -> f64 {
        self.position.distance_to(point)
    }
}

/// A borrowed reference to any entity on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    /// A ship.
    Ship(&'a Ship),
    /// A planet.
    Planet(&'a Planet),
}

impl EntityRef<'_> {
    /// Center position.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Ship(ship) => ship.position,
            Self::Planet(planet) => planet.position,
        }
    }

    /// Collision radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        match self {
            Self::Ship(ship) => ship.radius,
            Self::Planet(planet) => planet.radius,
        }
    }
}
