//! Docking-capacity accounting and target selection.
//!
//! Capacity is counted, not reserved: a planet is eligible while the ships
//! already docked plus the pilots on route to it stay below its docking
//! spots. Decisions made earlier in the same turn are visible through the
//! pilot map, but nothing rolls back an over-commitment.

use std::collections::BTreeMap;

use crate::entity::{Planet, PlanetId, Ship, ShipId};
use crate::pilot::Pilot;
use crate::world::WorldView;

/// Live pilots whose goal is heading to dock at `planet`.
#[must_use]
pub fn sent_count(pilots: &BTreeMap<ShipId, Pilot>, planet: PlanetId) -> usize {
    pilots
        .values()
        .filter(|pilot| pilot.is_on_route_to_planet(planet))
        .count()
}

/// Whether `planet` can take another of our ships.
#[must_use]
pub fn is_eligible(world: &dyn WorldView, pilots: &BTreeMap<ShipId, Pilot>, planet: &Planet) -> bool {
    let me = world.my_player_id();
    if planet.is_hostile_to(me) {
        return false;
    }
    if planet
        .docked_ships
        .iter()
        .any(|&id| world.ship(me, id).is_none())
    {
        return false;
    }
    if planet.is_full() {
        return false;
    }
    sent_count(pilots, planet.id) + planet.docked_count() < planet.docking_spots as usize
}

/// Nearest eligible planet to `ship` that also satisfies `filter`.
pub fn nearest_eligible_planet<'w, F>(
    world: &'w dyn WorldView,
    pilots: &BTreeMap<ShipId, Pilot>,
    ship: &Ship,
    filter: F,
) -> Option<&'w Planet>
where
    F: Fn(&Planet) -> bool,
{
    world
        .planets()
        .values()
        .filter(|planet| filter(planet) && is_eligible(world, pilots, planet))
        .min_by(|a, b| {
            ship.distance_to_point(a.position)
                .total_cmp(&ship.distance_to_point(b.position))
        })
}

/// Planet a new miner should head to: the nearest eligible unclaimed planet,
/// otherwise the nearest eligible planet we already own.
pub fn mining_target<'w>(
    world: &'w dyn WorldView,
    pilots: &BTreeMap<ShipId, Pilot>,
    ship: &Ship,
) -> Option<&'w Planet> {
    let me = world.my_player_id();
    nearest_eligible_planet(world, pilots, ship, |planet| !planet.is_owned()).or_else(|| {
        nearest_eligible_planet(world, pilots, ship, |planet| planet.owner == Some(me))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;
    use crate::entity::{DockingStatus, PlayerId};
    use crate::goal::Goal;
    use crate::math::Position;
    use crate::world::GameMap;

    const ME: PlayerId = PlayerId(0);

    fn ship(owner: PlayerId, id: u32, x: f64, y: f64) -> Ship {
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

    fn planet(id: u32, x: f64, spots: u32) -> Planet {
        Planet {
            id: PlanetId(id),
            position: Position::new(x, 50.0),
            radius: 4.0,
            health: 1000,
            docking_spots: spots,
            current_production: 0,
            remaining_production: 1000,
            owner: None,
            docked_ships: Vec::new(),
        }
    }

    #[test]
    fn test_capacity_counts_sent_and_docked() {
        let mut map = GameMap::new(ME, 200.0, 100.0);
        map.insert_ship(ship(ME, 1, 10.0, 50.0));
        let mut target = planet(1, 40.0, 2);
        target.owner = Some(ME);
        target.docked_ships.push(ShipId(1));
        map.insert_planet(target.clone());

        let mut pilots = BTreeMap::new();
        assert!(is_eligible(&map, &pilots, &target));

        pilots.insert(
            ShipId(2),
            Pilot::new(ShipId(2), Some(Goal::mine(&target, &BotConfig::default()))),
        );
        assert_eq!(sent_count(&pilots, PlanetId(1)), 1);
        assert!(!is_eligible(&map, &pilots, &target));
    }

    #[test]
    fn test_enemy_docked_planet_is_ineligible() {
        let mut map = GameMap::new(ME, 200.0, 100.0);
        let mut enemy_planet = planet(1, 40.0, 3);
        enemy_planet.docked_ships.push(ShipId(8));
        map.insert_ship(ship(PlayerId(1), 8, 40.0, 45.0));
        map.insert_planet(enemy_planet.clone());
        assert!(!is_eligible(&map, &BTreeMap::new(), &enemy_planet));
    }

    #[test]
    fn test_mining_target_prefers_unclaimed() {
        let mut map = GameMap::new(ME, 200.0, 100.0);
        map.insert_ship(ship(ME, 1, 10.0, 50.0));
        map.insert_ship(ship(ME, 2, 30.0, 45.0));
        let mut owned = planet(1, 30.0, 3);
        owned.owner = Some(ME);
        owned.docked_ships.push(ShipId(2));
        map.insert_planet(owned);
        map.insert_planet(planet(2, 90.0, 3));

        let me = map.ship(ME, ShipId(1)).cloned().unwrap();
        let pilots = BTreeMap::new();
        assert_eq!(mining_target(&map, &pilots, &me).map(|p| p.id), Some(PlanetId(2)));

        map.remove_planet(PlanetId(2));
        assert_eq!(mining_target(&map, &pilots, &me).map(|p| p.id), Some(PlanetId(1)));
    }
}
