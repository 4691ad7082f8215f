//! Multi-turn behaviors built from tasks.
//!
//! A [`Goal`] owns its tasks and a stage pointer. When the active task
//! completes or raises an alarm, the goal consults [`transition`], a pure
//! function of (goal kind, stage, signal), and either enters another stage,
//! ends, or asks the orchestrator for a replacement goal.
//!
//! Entering a new stage evaluates the new task immediately so a single
//! `update` still yields a move. That re-entry is bounded by
//! [`MAX_REENTRY_HOPS`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Move;
use crate::config::{BotConfig, NavProfile};
use crate::entity::{Planet, PlanetId, PlayerId, Ship, ShipId};
use crate::navigation::Navigator;
use crate::task::{
    DockPlanet, GoToPlanet, GoToShip, Issue, PatrolPlanet, SweepDirection, Task, TaskContext,
    TaskStep,
};
use crate::world::{nearest_enemy_ship, WorldView};

/// Maximum number of newly entered tasks evaluated within one `update`.
pub const MAX_REENTRY_HOPS: usize = 2;

/// What a goal is trying to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    /// Fly to a planet and dock.
    Mine {
        /// Planet to mine.
        planet: PlanetId,
    },
    /// Hunt one enemy ship.
    Attack {
        /// Owner of the target.
        target_player: PlayerId,
        /// Target ship.
        target_ship: ShipId,
        /// Ram instead of stopping at weapon range.
        kamikaze: bool,
    },
    /// Guard a planet, intercepting intruders.
    Defend {
        /// Planet to guard.
        planet: PlanetId,
    },
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mine { planet } => write!(f, "mine(planet {planet})"),
            Self::Attack {
                target_player,
                target_ship,
                kamikaze,
            } => write!(
                f,
                "attack(player {target_player} ship {target_ship}{})",
                if *kamikaze { ", kamikaze" } else { "" }
            ),
            Self::Defend { planet } => write!(f, "defend(planet {planet})"),
        }
    }
}

/// Which of the goal's tasks is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The travel task every goal starts with.
    Primary,
    /// The follow-up task (dock or patrol).
    Secondary,
    /// A temporary interception of a nearby enemy.
    Interrupt,
}

/// Signal raised by the active task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The task reached its terminal condition.
    Completed,
    /// The task cannot proceed.
    Alarm(Issue),
}

/// What the goal does in response to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Switch to another of the goal's own tasks.
    Enter(Stage),
    /// Start chasing the nearest enemy ship.
    Intercept,
    /// The goal is finished; the pilot goes idle.
    End,
    /// Ask the orchestrator for a different goal.
    Reassign,
    /// Ignore the signal and produce no move this turn.
    Hold,
}

/// The transition table shared by all goals.
#[must_use]
pub fn transition(kind: &GoalKind, stage: Stage, signal: Signal) -> Transition {
    use Issue::{EnemyClose, NoTarget};
    use Signal::{Alarm, Completed};
    use Stage::{Interrupt, Primary, Secondary};

    match (kind, stage, signal) {
        (GoalKind::Mine { .. }, Primary, Completed) => Transition::Enter(Secondary),
        (GoalKind::Mine { .. }, Secondary, Completed) => Transition::End,
        (GoalKind::Mine { .. }, _, Alarm(NoTarget)) => Transition::Reassign,

        (GoalKind::Attack { .. }, _, Completed) => Transition::End,
        (GoalKind::Attack { .. }, _, Alarm(NoTarget)) => Transition::Reassign,

        (GoalKind::Defend { .. }, Primary, Completed) => Transition::Enter(Secondary),
        (GoalKind::Defend { .. }, Secondary, Completed) => Transition::End,
        (GoalKind::Defend { .. }, Interrupt, Completed | Alarm(NoTarget)) => {
            Transition::Enter(Primary)
        }
        (GoalKind::Defend { .. }, _, Alarm(NoTarget)) => Transition::Reassign,
        (GoalKind::Defend { .. }, _, Alarm(EnemyClose)) => Transition::Intercept,

        _ => Transition::Hold,
    }
}

/// Outcome of one goal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStep {
    /// The active task produced this (possibly empty) move.
    Move(Option<Move>),
    /// The goal finished.
    Ended,
    /// The goal cannot continue and needs replacing.
    NeedsGoal,
}

/// A behavior with its eagerly constructed tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    kind: GoalKind,
    stage: Stage,
    primary: Task,
    secondary: Option<Task>,
    interrupt: Option<Task>,
}

impl Goal {
    /// Fly to `planet` and dock there.
    #[must_use]
    pub fn mine(planet: &Planet, config: &BotConfig) -> Self {
        Self {
            kind: GoalKind::Mine { planet: planet.id },
            stage: Stage::Primary,
            primary: Task::GoToPlanet(GoToPlanet {
                planet: planet.id,
                stop_radius: planet.radius + config.dock_radius,
                for_docking: true,
            }),
            secondary: Some(Task::DockPlanet(DockPlanet {
                planet: planet.id,
                attempts: 0,
            })),
            interrupt: None,
        }
    }

    /// Chase `target` to weapon range, or ram it when `kamikaze`.
    #[must_use]
    pub fn attack(target: &Ship, kamikaze: bool, config: &BotConfig) -> Self {
        Self {
            kind: GoalKind::Attack {
                target_player: target.owner,
                target_ship: target.id,
                kamikaze,
            },
            stage: Stage::Primary,
            primary: Task::GoToShip(GoToShip {
                target_player: target.owner,
                target_ship: target.id,
                stop_radius: if kamikaze {
                    0.0
                } else {
                    config.attack_stop_radius
                },
                kamikaze,
            }),
            secondary: None,
            interrupt: None,
        }
    }

    /// Reach orbit around `planet` and patrol it.
    #[must_use]
    pub fn defend(planet: &Planet, config: &BotConfig) -> Self {
        let orbit_radius = planet.radius + config.patrol_orbit_margin;
        Self {
            kind: GoalKind::Defend { planet: planet.id },
            stage: Stage::Primary,
            primary: Task::GoToPlanet(GoToPlanet {
                planet: planet.id,
                stop_radius: orbit_radius,
                for_docking: false,
            }),
            secondary: Some(Task::PatrolPlanet(PatrolPlanet {
                planet: planet.id,
                orbit_radius,
                sweep: SweepDirection::default(),
                angle_deg: None,
            })),
            interrupt: None,
        }
    }

    /// What this goal is doing.
    #[must_use]
    pub const fn kind(&self) -> &GoalKind {
        &self.kind
    }

    /// Which task is active.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// The active task.
    #[must_use]
    pub fn active_task(&self) -> Option<&Task> {
        match self.stage {
            Stage::Primary => Some(&self.primary),
            Stage::Secondary => self.secondary.as_ref(),
            Stage::Interrupt => self.interrupt.as_ref(),
        }
    }

    fn active_task_mut(&mut self) -> Option<&mut Task> {
        match self.stage {
            Stage::Primary => Some(&mut self.primary),
            Stage::Secondary => self.secondary.as_mut(),
            Stage::Interrupt => self.interrupt.as_mut(),
        }
    }

    /// Whether this goal has a ship heading to dock at `planet`.
    #[must_use]
    pub fn is_on_route_to_planet(&self, planet: PlanetId) -> bool {
        matches!(self.kind, GoalKind::Mine { planet: p } if p == planet)
    }

    fn nav_profile(&self, config: &BotConfig) -> NavProfile {
        match self.kind {
            GoalKind::Mine { .. } => config.mine_nav,
            GoalKind::Attack { .. } => config.attack_nav,
            GoalKind::Defend { .. } => config.defend_nav,
        }
    }

    /// Point the interception task at the nearest enemy ship, if there is one.
    fn start_interception(&mut self, world: &dyn WorldView, ship: &Ship, config: &BotConfig) -> bool {
        let Some(enemy) = nearest_enemy_ship(world, ship, |_| true) else {
            return false;
        };
        tracing::debug!(ship = %ship.id, enemy = %enemy.id, "intercepting");
        self.interrupt = Some(Task::GoToShip(GoToShip {
            target_player: enemy.owner,
            target_ship: enemy.id,
            stop_radius: config.attack_stop_radius,
            kamikaze: false,
        }));
        self.stage = Stage::Interrupt;
        true
    }

    /// Evaluate the active task, following transitions within this turn.
    pub fn update(
        &mut self,
        world: &dyn WorldView,
        navigator: &dyn Navigator,
        config: &BotConfig,
        ship: &Ship,
    ) -> GoalStep {
        let ctx = TaskContext {
            world,
            navigator,
            config,
            nav: self.nav_profile(config),
            ship,
        };

        for _ in 0..=MAX_REENTRY_HOPS {
            let Some(task) = self.active_task_mut() else {
                return GoalStep::Ended;
            };
            let signal = match task.update(&ctx) {
                TaskStep::Move(next) => return GoalStep::Move(next),
                TaskStep::Completed => Signal::Completed,
                TaskStep::Alarm(issue) => Signal::Alarm(issue),
            };

            match transition(&self.kind, self.stage, signal) {
                Transition::Enter(stage) => {
                    tracing::debug!(ship = %ship.id, goal = %self.kind, ?signal, ?stage, "task transition");
                    self.stage = stage;
                }
                Transition::Intercept => {
                    if !self.start_interception(world, ship, config) {
                        return GoalStep::Move(None);
                    }
                }
                Transition::End => return GoalStep::Ended,
                Transition::Reassign => return GoalStep::NeedsGoal,
                Transition::Hold => return GoalStep::Move(None),
            }
        }

        tracing::warn!(ship = %ship.id, goal = %self.kind, "re-entry limit reached");
        GoalStep::Move(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINE: GoalKind = GoalKind::Mine { planet: PlanetId(1) };
    const DEFEND: GoalKind = GoalKind::Defend { planet: PlanetId(1) };
    const ATTACK: GoalKind = GoalKind::Attack {
        target_player: PlayerId(1),
        target_ship: ShipId(2),
        kamikaze: false,
    };

    #[test]
    fn test_mine_transitions() {
        assert_eq!(
            transition(&MINE, Stage::Primary, Signal::Completed),
            Transition::Enter(Stage::Secondary)
        );
        assert_eq!(
            transition(&MINE, Stage::Secondary, Signal::Completed),
            Transition::End
        );
        assert_eq!(
            transition(&MINE, Stage::Primary, Signal::Alarm(Issue::NoTarget)),
            Transition::Reassign
        );
        assert_eq!(
            transition(&MINE, Stage::Secondary, Signal::Alarm(Issue::NoTarget)),
            Transition::Reassign
        );
        assert_eq!(
            transition(&MINE, Stage::Primary, Signal::Alarm(Issue::EnemyClose)),
            Transition::Hold
        );
    }

    #[test]
    fn test_attack_transitions() {
        assert_eq!(
            transition(&ATTACK, Stage::Primary, Signal::Completed),
            Transition::End
        );
        assert_eq!(
            transition(&ATTACK, Stage::Primary, Signal::Alarm(Issue::NoTarget)),
            Transition::Reassign
        );
    }

    #[test]
    fn test_defend_transitions() {
        assert_eq!(
            transition(&DEFEND, Stage::Primary, Signal::Completed),
            Transition::Enter(Stage::Secondary)
        );
        assert_eq!(
            transition(&DEFEND, Stage::Secondary, Signal::Completed),
            Transition::End
        );
        assert_eq!(
            transition(&DEFEND, Stage::Secondary, Signal::Alarm(Issue::EnemyClose)),
            Transition::Intercept
        );
        assert_eq!(
            transition(&DEFEND, Stage::Interrupt, Signal::Alarm(Issue::NoTarget)),
            Transition::Enter(Stage::Primary)
        );
        assert_eq!(
            transition(&DEFEND, Stage::Interrupt, Signal::Completed),
            Transition::Enter(Stage::Primary)
        );
        assert_eq!(
            transition(&DEFEND, Stage::Secondary, Signal::Alarm(Issue::NoTarget)),
            Transition::Reassign
        );
        assert_eq!(
            transition(&DEFEND, Stage::Primary, Signal::Alarm(Issue::NoTarget)),
            Transition::Reassign
        );
    }

    #[test]
    fn test_only_mine_is_on_route() {
        let planet = Planet {
            id: PlanetId(1),
            position: crate::math::Position::new(10.0, 10.0),
            radius: 3.0,
            health: 1000,
            docking_spots: 2,
            current_production: 0,
            remaining_production: 1000,
            owner: None,
            docked_ships: Vec::new(),
        };
        let config = BotConfig::default();
        assert!(Goal::mine(&planet, &config).is_on_route_to_planet(PlanetId(1)));
        assert!(!Goal::mine(&planet, &config).is_on_route_to_planet(PlanetId(2)));
        assert!(!Goal::defend(&planet, &config).is_on_route_to_planet(PlanetId(1)));
    }
}
