//! Per-ship controller.

use crate::command::Move;
use crate::config::BotConfig;
use crate::entity::{PlanetId, ShipId};
use crate::error::{BotError, Result};
use crate::goal::{Goal, GoalStep};
use crate::navigation::Navigator;
use crate::world::WorldView;

/// Outcome of one pilot evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotStep {
    /// The (possibly empty) move for this ship.
    Move(Option<Move>),
    /// The goal gave up; the orchestrator should assign a new one.
    NeedsGoal,
}

/// Controller for one friendly ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Pilot {
    ship: ShipId,
    goal: Option<Goal>,
}

impl Pilot {
    /// Create a pilot for `ship` with its initial goal.
    #[must_use]
    pub fn new(ship: ShipId, goal: Option<Goal>) -> Self {
        match &goal {
            Some(goal) => tracing::info!(%ship, goal = %goal.kind(), "constructing pilot"),
            None => tracing::info!(%ship, "constructing idle pilot"),
        }
        Self { ship, goal }
    }

    /// The piloted ship.
    #[must_use]
    pub const fn ship_id(&self) -> ShipId {
        self.ship
    }

    /// The current goal, if any.
    #[must_use]
    pub const fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    /// Whether the pilot has no goal.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.goal.is_none()
    }

    /// Replace the current goal.
    pub fn set_goal(&mut self, goal: Option<Goal>) {
        if let Some(goal) = &goal {
            tracing::info!(ship = %self.ship, goal = %goal.kind(), "goal assigned");
        }
        self.goal = goal;
    }

    /// Whether this pilot counts against `planet`'s docking capacity.
    #[must_use]
    pub fn is_on_route_to_planet(&self, planet: PlanetId) -> bool {
        self.goal
            .as_ref()
            .is_some_and(|goal| goal.is_on_route_to_planet(planet))
    }

    /// Evaluate the current goal for this turn.
    pub fn update(
        &mut self,
        world: &dyn WorldView,
        navigator: &dyn Navigator,
        config: &BotConfig,
    ) -> Result<PilotStep> {
        let me = world.my_player_id();
        let ship = world.ship(me, self.ship).ok_or(BotError::ShipNotFound {
            player: me,
            ship: self.ship,
        })?;

        let Some(goal) = self.goal.as_mut() else {
            return Ok(PilotStep::Move(None));
        };

        match goal.update(world, navigator, config, ship) {
            GoalStep::Move(next) => Ok(PilotStep::Move(next)),
            GoalStep::Ended => {
                tracing::info!(ship = %self.ship, goal = %goal.kind(), "goal finished");
                self.goal = None;
                Ok(PilotStep::Move(None))
            }
            GoalStep::NeedsGoal => {
                tracing::info!(ship = %self.ship, goal = %goal.kind(), "goal abandoned");
                self.goal = None;
                Ok(PilotStep::NeedsGoal)
            }
        }
    }

    /// Hook run when the ship leaves the game.
    pub fn teardown(&self) {
        tracing::info!(ship = %self.ship, "destructing pilot");
    }
}
