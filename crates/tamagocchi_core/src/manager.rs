//! Turn orchestration.
//!
//! [`GameManager`] owns the ship → pilot map. Each turn it reconciles the map
//! with the ships alive in the snapshot, hands new pilots a goal from the
//! assignment policy, drives every pilot once, and filters the resulting
//! moves through collision resolution.
//!
//! # Assignment policy
//!
//! Every assignment bumps a monotonic counter first.
//!
//! - Turn 1: the first assignment fixes the *first planet*, the nearest
//!   eligible planet to that ship. The first `opening_miners` assignments mine
//!   it; the rest defend it.
//! - Later turns (and every reassignment): when the counter is a multiple of
//!   `attack_period`, attack the nearest docked enemy. Otherwise mine the
//!   nearest eligible unclaimed planet, else the nearest eligible planet we
//!   own. An attack with no docked enemy in sight falls back to mining; with
//!   no planet left either, the nearest enemy ship of any state is attacked.
//!   Failing all of that the pilot stays idle.

use std::collections::{BTreeMap, BTreeSet};

use crate::assignment::{mining_target, nearest_eligible_planet};
use crate::collision::resolve_collisions;
use crate::command::Move;
use crate::config::BotConfig;
use crate::entity::{PlanetId, Ship, ShipId};
use crate::error::{BotError, Result};
use crate::goal::Goal;
use crate::navigation::{Navigator, ObstacleNavigator};
use crate::pilot::{Pilot, PilotStep};
use crate::world::{nearest_enemy_ship, WorldView};

/// Goal requests a single pilot may make within one turn.
const MAX_GOAL_REQUESTS: usize = 2;

/// The per-turn orchestrator.
#[derive(Debug)]
pub struct GameManager<N = ObstacleNavigator> {
    config: BotConfig,
    navigator: N,
    turn: u64,
    assignments: u64,
    first_planet: Option<PlanetId>,
    pilots: BTreeMap<ShipId, Pilot>,
}

impl Default for GameManager<ObstacleNavigator> {
    fn default() -> Self {
        let config = BotConfig::default();
        let navigator = ObstacleNavigator::new(config.ship_radius);
        Self::new(config, navigator)
    }
}

impl<N: Navigator> GameManager<N> {
    /// Create a manager with no pilots, before turn 1.
    #[must_use]
    pub fn new(config: BotConfig, navigator: N) -> Self {
        Self {
            config,
            navigator,
            turn: 0,
            assignments: 0,
            first_planet: None,
            pilots: BTreeMap::new(),
        }
    }

    /// The last turn processed (0 before the first update).
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// Number of goal assignments made so far.
    #[must_use]
    pub const fn assignments(&self) -> u64 {
        self.assignments
    }

    /// The planet chosen by the first assignment of the game.
    #[must_use]
    pub const fn first_planet(&self) -> Option<PlanetId> {
        self.first_planet
    }

    /// Tracked pilots keyed by ship.
    #[must_use]
    pub const fn pilots(&self) -> &BTreeMap<ShipId, Pilot> {
        &self.pilots
    }

    /// The pilot for `ship`, if tracked.
    #[must_use]
    pub fn pilot(&self, ship: ShipId) -> Option<&Pilot> {
        self.pilots.get(&ship)
    }

    /// Bot configuration.
    #[must_use]
    pub const fn config(&self) -> &BotConfig {
        &self.config
    }

    /// The navigator in use.
    #[must_use]
    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Compute this turn's commands.
    pub fn update(&mut self, world: &dyn WorldView) -> Result<Vec<Move>> {
        self.turn += 1;
        let me = world.my_player_id();
        let ships = world.ships_of(me);
        let live: BTreeSet<ShipId> = ships.iter().map(|ship| ship.id).collect();

        for ship in ships {
            if !self.pilots.contains_key(&ship.id) {
                let goal = self.assign_initial_goal(world, ship);
                self.pilots.insert(ship.id, Pilot::new(ship.id, goal));
            }
        }

        let vanished: Vec<ShipId> = self
            .pilots
            .keys()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();
        for id in vanished {
            if let Some(pilot) = self.pilots.remove(&id) {
                pilot.teardown();
            }
        }

        let ids: Vec<ShipId> = self.pilots.keys().copied().collect();
        let mut moves = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(command) = self.drive_pilot(world, id)? {
                moves.push(command);
            }
        }

        let cancelled = resolve_collisions(world, &mut moves, &self.config);
        tracing::debug!(
            turn = self.turn,
            pilots = self.pilots.len(),
            moves = moves.len(),
            cancelled,
            "turn computed"
        );
        Ok(moves)
    }

    /// Run one pilot, replacing its goal when asked to.
    fn drive_pilot(&mut self, world: &dyn WorldView, id: ShipId) -> Result<Option<Move>> {
        let me = world.my_player_id();
        let ship = world
            .ship(me, id)
            .ok_or(BotError::ShipNotFound { player: me, ship: id })?;

        let idle = self.pilots.get(&id).is_some_and(Pilot::is_idle);
        if idle && ship.is_undocked() {
            let goal = self.assign_followup_goal(world, ship);
            if let Some(pilot) = self.pilots.get_mut(&id) {
                pilot.set_goal(goal);
            }
        }

        for _ in 0..MAX_GOAL_REQUESTS {
            let Some(pilot) = self.pilots.get_mut(&id) else {
                return Ok(None);
            };
            match pilot.update(world, &self.navigator, &self.config)? {
                PilotStep::Move(command) => return Ok(command),
                PilotStep::NeedsGoal => {
                    let goal = self.assign_followup_goal(world, ship);
                    if let Some(pilot) = self.pilots.get_mut(&id) {
                        pilot.set_goal(goal);
                    }
                }
            }
        }
        Ok(None)
    }

    /// Goal for a pilot created this turn.
    fn assign_initial_goal(&mut self, world: &dyn WorldView, ship: &Ship) -> Option<Goal> {
        self.assignments += 1;
        if self.turn != 1 {
            return self.later_turn_goal(world, ship);
        }

        if self.assignments == 1 {
            self.first_planet =
                nearest_eligible_planet(world, &self.pilots, ship, |_| true).map(|planet| planet.id);
            tracing::info!(first_planet = ?self.first_planet, "opening planet chosen");
        }

        match self.first_planet.and_then(|id| world.planet(id)) {
            Some(planet) if self.assignments <= self.config.opening_miners => {
                Some(Goal::mine(planet, &self.config))
            }
            Some(planet) => Some(Goal::defend(planet, &self.config)),
            None => self.later_turn_goal(world, ship),
        }
    }

    /// Goal for an existing pilot whose previous goal ended or failed.
    fn assign_followup_goal(&mut self, world: &dyn WorldView, ship: &Ship) -> Option<Goal> {
        self.assignments += 1;
        self.later_turn_goal(world, ship)
    }

    fn later_turn_goal(&self, world: &dyn WorldView, ship: &Ship) -> Option<Goal> {
        if self.assignments % self.config.attack_period == 0 {
            if let Some(target) = nearest_enemy_ship(world, ship, Ship::is_docked) {
                return Some(Goal::attack(target, false, &self.config));
            }
        }
        if let Some(planet) = mining_target(world, &self.pilots, ship) {
            return Some(Goal::mine(planet, &self.config));
        }
        nearest_enemy_ship(world, ship, |_| true)
            .map(|target| Goal::attack(target, false, &self.config))
    }
}

