//! Test fixtures and helpers.
//!
//! Pre-built snapshots for consistent testing. Everything funnels through
//! [`WorldBuilder`], which produces a plain [`GameMap`].

use tamagocchi_core::entity::{DockingStatus, Planet, PlanetId, PlayerId, Ship, ShipId};
use tamagocchi_core::math::Position;
use tamagocchi_core::world::GameMap;

/// The player controlled by the bot in every fixture.
pub const ME: PlayerId = PlayerId(0);
/// The default opponent.
pub const ENEMY: PlayerId = PlayerId(1);

/// An undocked ship at `(x, y)`.
#[must_use]
pub fn ship(owner: PlayerId, id: u32, x: f64, y: f64) -> Ship {
    Ship {
        id: ShipId(id),
        owner,
        position: Position::new(x, y),
        radius: 0.5,
        health: 255,
        docking_status: DockingStatus::Undocked,
        docked_planet: None,
        docking_progress: 0,
        weapon_cooldown: 0,
    }
}

/// A ship docked to `planet`.
#[must_use]
pub fn docked_ship(owner: PlayerId, id: u32, x: f64, y: f64, planet: u32) -> Ship {
    Ship {
        docking_status: DockingStatus::Docked,
        docked_planet: Some(PlanetId(planet)),
        ..ship(owner, id, x, y)
    }
}

/// An unowned planet with no docked ships.
#[must_use]
pub fn planet(id: u32, x: f64, y: f64, radius: f64, docking_spots: u32) -> Planet {
    Planet {
        id: PlanetId(id),
        position: Position::new(x, y),
        radius,
        health: 1000,
        docking_spots,
        current_production: 0,
        remaining_production: 1000,
        owner: None,
        docked_ships: Vec::new(),
    }
}

/// Fluent builder for [`GameMap`] snapshots.
#[derive(Debug, Clone)]
pub struct WorldBuilder {
    map: GameMap,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new(240.0, 160.0)
    }
}

impl WorldBuilder {
    /// Start an empty map controlled by [`ME`] against [`ENEMY`].
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let mut map = GameMap::new(ME, width, height);
        map.add_player(ME);
        map.add_player(ENEMY);
        Self { map }
    }

    /// Add a ship.
    #[must_use]
    pub fn ship(mut self, ship: Ship) -> Self {
        self.map.insert_ship(ship);
        self
    }

    /// Add one of our undocked ships.
    #[must_use]
    pub fn my_ship(self, id: u32, x: f64, y: f64) -> Self {
        self.ship(ship(ME, id, x, y))
    }

    /// Add an undocked enemy ship.
    #[must_use]
    pub fn enemy_ship(self, id: u32, x: f64, y: f64) -> Self {
        self.ship(ship(ENEMY, id, x, y))
    }

    /// Add a planet.
    #[must_use]
    pub fn planet(mut self, planet: Planet) -> Self {
        self.map.insert_planet(planet);
        self
    }

    /// Dock an already-added ship to an already-added planet, claiming it for the ship's owner.
    #[must_use]
    pub fn dock(mut self, owner: PlayerId, ship: u32, planet: u32) -> Self {
        if let Some(s) = self.map.ship_mut(owner, ShipId(ship)) {
            s.docking_status = DockingStatus::Docked;
            s.docked_planet = Some(PlanetId(planet));
        }
        if let Some(p) = self.map.planet_mut(PlanetId(planet)) {
            p.owner = Some(owner);
            p.docked_ships.push(ShipId(ship));
        }
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> GameMap {
        self.map
    }
}

/// Hand over ownership of `planet` to `owner` with one docked ship.
///
/// Used to script a capture between two turns of the same map.
pub fn capture_planet(map: &mut GameMap, planet: u32, owner: PlayerId, docked_ship: u32) {
    if let Some(p) = map.planet_mut(PlanetId(planet)) {
        p.owner = Some(owner);
        p.docked_ships = vec![ShipId(docked_ship)];
    }
}

/// Two-planet opening: three of our ships in the west, one near planet, one far.
///
/// - planet 0 at (60, 80), radius 5, 3 spots (nearest to our ships)
/// - planet 1 at (120, 40), radius 6, 2 spots
/// - our ships 0, 1, 2 around (20, 80)
/// - enemy ships 10, 11 in the east
#[must_use]
pub fn opening_map() -> GameMap {
    WorldBuilder::default()
        .planet(planet(0, 60.0, 80.0, 5.0, 3))
        .planet(planet(1, 120.0, 40.0, 6.0, 2))
        .my_ship(0, 20.0, 76.0)
        .my_ship(1, 20.0, 80.0)
        .my_ship(2, 20.0, 84.0)
        .enemy_ship(10, 220.0, 76.0)
        .enemy_ship(11, 220.0, 84.0)
        .build()
}
