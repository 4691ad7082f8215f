//! Proptest strategies for the decision engine.
//!
//! These strategies generate random but reproducible snapshots and move
//! batches for property-based testing.

use proptest::prelude::*;
use tamagocchi_core::command::Move;
use tamagocchi_core::entity::{Planet, ShipId};
use tamagocchi_core::world::GameMap;

use crate::fixtures::{planet, WorldBuilder, ENEMY};

/// Map coordinate inside a 240 x 160 map, away from the edges.
pub fn arb_coord() -> impl Strategy<Value = (f64, f64)> {
    (10.0f64..230.0, 10.0f64..150.0)
}

/// A planet with a random radius and docking capacity.
pub fn arb_planet(id: u32) -> impl Strategy<Value = Planet> {
    (arb_coord(), 3.0f64..8.0, 1u32..6)
        .prop_map(move |((x, y), radius, spots)| planet(id, x, y, radius, spots))
}

/// A snapshot with up to `max_planets` planets, `max_ships` of our ships and
/// a couple of enemies. Our ship ids are `0..n`.
pub fn arb_world(max_planets: usize, max_ships: usize) -> impl Strategy<Value = GameMap> {
    let planets = (1..=max_planets).prop_flat_map(|n| {
        (0..n as u32)
            .map(arb_planet)
            .collect::<Vec<_>>()
    });
    let ships = proptest::collection::vec(arb_coord(), 1..=max_ships);
    let enemies = proptest::collection::vec(arb_coord(), 0..3);

    (planets, ships, enemies).prop_map(|(planets, ships, enemies)| {
        let mut builder = WorldBuilder::default();
        for p in planets {
            builder = builder.planet(p);
        }
        for (i, (x, y)) in ships.into_iter().enumerate() {
            builder = builder.my_ship(i as u32, x, y);
        }
        for (i, (x, y)) in enemies.into_iter().enumerate() {
            builder = builder.ship(crate::fixtures::ship(ENEMY, 100 + i as u32, x, y));
        }
        builder.build()
    })
}

/// A thrust command for ship `id`.
pub fn arb_thrust(id: u32) -> impl Strategy<Value = Move> {
    (0i32..360, 0i32..=7).prop_map(move |(angle_deg, magnitude)| Move::Thrust {
        ship: ShipId(id),
        angle_deg,
        magnitude,
    })
}
