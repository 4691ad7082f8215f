//! Read-only per-turn world snapshot.
//!
//! The decision engine only sees the world through [`WorldView`]; the
//! [`GameMap`] snapshot built from the engine's map line is the production
//! implementation, and test fixtures build the same type directly.

use std::collections::BTreeMap;

use crate::entity::{EntityRef, Planet, PlanetId, PlayerId, Ship, ShipId};

/// Read-only view of a single turn's state.
pub trait WorldView {
    /// The player this bot controls.
    fn my_player_id(&self) -> PlayerId;

    /// Map width.
    fn width(&self) -> f64;

    /// Map height.
    fn height(&self) -> f64;

    /// Look up a planet.
    fn planet(&self, id: PlanetId) -> Option<&Planet>;

    /// Look up a ship owned by `player`.
    fn ship(&self, player: PlayerId, id: ShipId) -> Option<&Ship>;

    /// All planets keyed by id.
    fn planets(&self) -> &BTreeMap<PlanetId, Planet>;

    /// Ships owned by `player`, in ascending id order.
    fn ships_of(&self, player: PlayerId) -> Vec<&Ship>;

    /// Every ship on the map.
    fn all_ships(&self) -> Vec<&Ship>;

    /// Every planet and ship other than `origin`, nearest first.
    fn nearby_entities_by_distance(&self, origin: &Ship) -> Vec<(f64, EntityRef<'_>)> {
        let mut entities: Vec<(f64, EntityRef<'_>)> = self
            .planets()
            .values()
            .map(|planet| (origin.distance_to_point(planet.position), EntityRef::Planet(planet)))
            .chain(
                self.all_ships()
                    .into_iter()
                    .filter(|ship| !(ship.id == origin.id && ship.owner == origin.owner))
                    .map(|ship| (origin.distance_to(ship), EntityRef::Ship(ship))),
            )
            .collect();
        entities.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        entities
    }
}

/// Nearest ship not owned by `origin`'s owner that satisfies `filter`.
pub fn nearest_enemy_ship<'w, W, F>(world: &'w W, origin: &Ship, filter: F) -> Option<&'w Ship>
where
    W: WorldView + ?Sized,
    F: Fn(&Ship) -> bool,
{
    world
        .nearby_entities_by_distance(origin)
        .into_iter()
        .find_map(|(_, entity)| match entity {
            EntityRef::Ship(ship) if ship.owner != origin.owner && filter(ship) => Some(ship),
            _ => None,
        })
}

/// Snapshot of the map for one turn.
#[derive(Debug, Clone)]
pub struct GameMap {
    my_id: PlayerId,
    width: f64,
    height: f64,
    ships: BTreeMap<PlayerId, BTreeMap<ShipId, Ship>>,
    planets: BTreeMap<PlanetId, Planet>,
}

impl GameMap {
    /// Create an empty map of the given dimensions.
    #[must_use]
    pub fn new(my_id: PlayerId, width: f64, height: f64) -> Self {
        Self {
            my_id,
            width,
            height,
            ships: BTreeMap::new(),
            planets: BTreeMap::new(),
        }
    }

    /// Register a player, even one with no ships left.
    pub fn add_player(&mut self, player: PlayerId) {
        self.ships.entry(player).or_default();
    }

    /// Insert or replace a ship.
    pub fn insert_ship(&mut self, ship: Ship) {
        self.ships.entry(ship.owner).or_default().insert(ship.id, ship);
    }

    /// Insert or replace a planet.
    pub fn insert_planet(&mut self, planet: Planet) {
        self.planets.insert(planet.id, planet);
    }

    /// Remove a ship, returning it if present.
    pub fn remove_ship(&mut self, player: PlayerId, id: ShipId) -> Option<Ship> {
        self.ships.get_mut(&player).and_then(|ships| ships.remove(&id))
    }

    /// Remove a planet, returning it if present.
    pub fn remove_planet(&mut self, id: PlanetId) -> Option<Planet> {
        self.planets.remove(&id)
    }

    /// Mutable access to a planet (used by fixtures to script ownership changes).
    pub fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.get_mut(&id)
    }

    /// Mutable access to a ship.
    pub fn ship_mut(&mut self, player: PlayerId, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(&player).and_then(|ships| ships.get_mut(&id))
    }

    /// Registered players in ascending id order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerId> {
        self.ships.keys().copied().collect()
    }
}

impl WorldView for GameMap {
    fn my_player_id(&self) -> PlayerId {
        self.my_id
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(&id)
    }

    fn ship(&self, player: PlayerId, id: ShipId) -> Option<&Ship> {
        self.ships.get(&player).and_then(|ships| ships.get(&id))
    }

    fn planets(&self) -> &BTreeMap<PlanetId, Planet> {
        &self.planets
    }

    fn ships_of(&self, player: PlayerId) -> Vec<&Ship> {
        self.ships
            .get(&player)
            .map(|ships| ships.values().collect())
            .unwrap_or_default()
    }

    fn all_ships(&self) -> Vec<&Ship> {
        self.ships.values().flat_map(|ships| ships.values()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::DockingStatus;
    use crate::math::Position;

    fn ship(owner: u32, id: u32, x: f64, y: f64, status: DockingStatus) -> Ship {
        Ship {
            id: ShipId(id),
            owner: PlayerId(owner),
            position: Position::new(x, y),
            radius: 0.5,
            health: 255,
            docking_status: status,
            docked_planet: None,
            docking_progress: 0,
            weapon_cooldown: 0,
        }
    }

    fn sample_map() -> GameMap {
        let mut map = GameMap::new(PlayerId(0), 100.0, 80.0);
        map.insert_ship(ship(0, 1, 10.0, 10.0, DockingStatus::Undocked));
        map.insert_ship(ship(0, 2, 12.0, 10.0, DockingStatus::Undocked));
        map.insert_ship(ship(1, 1, 30.0, 10.0, DockingStatus::Undocked));
        map.insert_ship(ship(1, 7, 50.0, 10.0, DockingStatus::Docked));
        map.insert_planet(Planet {
            id: PlanetId(3),
            position: Position::new(10.0, 20.0),
            radius: 4.0,
            health: 1000,
            docking_spots: 2,
            current_production: 0,
            remaining_production: 1000,
            owner: None,
            docked_ships: Vec::new(),
        });
        map
    }

    #[test]
    fn test_nearby_entities_sorted_and_exclude_self() {
        let map = sample_map();
        let me = map.ship(PlayerId(0), ShipId(1)).cloned().unwrap();
        let nearby = map.nearby_entities_by_distance(&me);

        assert_eq!(nearby.len(), 4);
        assert!(nearby.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(nearby.iter().all(|(_, e)| match e {
            EntityRef::Ship(s) => !(s.id == ShipId(1) && s.owner == PlayerId(0)),
            EntityRef::Planet(_) => true,
        }));
    }

    #[test]
    fn test_same_id_different_owner_is_not_self() {
        let map = sample_map();
        let me = map.ship(PlayerId(0), ShipId(1)).cloned().unwrap();
        let enemy = nearest_enemy_ship(&map, &me, |_| true).unwrap();
        assert_eq!((enemy.owner, enemy.id), (PlayerId(1), ShipId(1)));
    }

    #[test]
    fn test_nearest_enemy_with_filter() {
        let map = sample_map();
        let me = map.ship(PlayerId(0), ShipId(1)).cloned().unwrap();
        let docked = nearest_enemy_ship(&map, &me, Ship::is_docked).unwrap();
        assert_eq!(docked.id, ShipId(7));
    }

    #[test]
    fn test_ships_of_unknown_player_is_empty() {
        let map = sample_map();
        assert!(map.ships_of(PlayerId(9)).is_empty());
        assert_eq!(map.ships_of(PlayerId(0)).len(), 2);
    }
}
