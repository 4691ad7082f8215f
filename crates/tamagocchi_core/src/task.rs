//! Atomic per-ship behaviors.
//!
//! A [`Task`] is evaluated once per turn for one ship. It either yields a
//! move (possibly none, when the navigator finds no safe heading) or signals
//! its owning goal through [`TaskStep::Completed`] / [`TaskStep::Alarm`].
//! Tasks never decide what happens next; that is the goal's transition table.

use serde::{Deserialize, Serialize};

use crate::command::Move;
use crate::config::{BotConfig, NavProfile};
use crate::entity::{PlanetId, PlayerId, Ship, ShipId};
use crate::math::Position;
use crate::navigation::Navigator;
use crate::world::{nearest_enemy_ship, WorldView};

/// Why a task cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issue {
    /// The target vanished or became invalid (e.g. captured by an enemy).
    NoTarget,
    /// A hostile ship came within interception range of a patrol.
    EnemyClose,
}

/// Result of one task evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStep {
    /// Keep going; the move may be absent when no safe heading exists.
    Move(Option<Move>),
    /// The task reached its terminal condition.
    Completed,
    /// The task cannot proceed as configured.
    Alarm(Issue),
}

/// Everything a task may consult during one evaluation.
#[derive(Clone, Copy)]
pub struct TaskContext<'a> {
    /// Current snapshot.
    pub world: &'a dyn WorldView,
    /// Thrust planner.
    pub navigator: &'a dyn Navigator,
    /// Bot configuration.
    pub config: &'a BotConfig,
    /// Navigation tuning of the owning goal.
    pub nav: NavProfile,
    /// The ship being piloted.
    pub ship: &'a Ship,
}

/// Direction the patrol sweep advances around the orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepDirection {
    /// Increasing angle.
    #[default]
    CounterClockwise,
    /// Decreasing angle.
    Clockwise,
}

impl SweepDirection {
    /// Sign applied to the sweep step.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
        }
    }
}

/// Travel until within `stop_radius` of a planet's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoToPlanet {
    /// Destination planet.
    pub planet: PlanetId,
    /// Distance from the planet's center that counts as arrived.
    pub stop_radius: f64,
    /// Whether the trip ends in a dock attempt (a full planet is then useless).
    pub for_docking: bool,
}

/// Chase a ship until within `stop_radius` of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoToShip {
    /// Owner of the target.
    pub target_player: PlayerId,
    /// Target ship.
    pub target_ship: ShipId,
    /// Distance that counts as arrived.
    pub stop_radius: f64,
    /// Ram the target: no obstacle avoidance.
    pub kamikaze: bool,
}

/// Issue dock requests until the attempt budget runs out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockPlanet {
    /// Planet to dock to.
    pub planet: PlanetId,
    /// Dock requests issued so far.
    pub attempts: u32,
}

/// Circle a planet, watching for hostile ships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolPlanet {
    /// Guarded planet.
    pub planet: PlanetId,
    /// Orbit radius from the planet's center.
    pub orbit_radius: f64,
    /// Current sweep direction.
    pub sweep: SweepDirection,
    /// Current orbit angle in degrees, fixed on the first evaluation.
    pub angle_deg: Option<f64>,
}

/// A per-ship sub-behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Task {
    /// Travel to a planet.
    GoToPlanet(GoToPlanet),
    /// Travel to a ship.
    GoToShip(GoToShip),
    /// Dock to an adjacent planet.
    DockPlanet(DockPlanet),
    /// Orbit a planet.
    PatrolPlanet(PatrolPlanet),
}

impl Task {
    /// Evaluate the task for this turn.
    pub fn update(&mut self, ctx: &TaskContext<'_>) -> TaskStep {
        match self {
            Self::GoToPlanet(task) => task.update(ctx),
            Self::GoToShip(task) => task.update(ctx),
            Self::DockPlanet(task) => task.update(ctx),
            Self::PatrolPlanet(task) => task.update(ctx),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GoToPlanet(_) => "go_to_planet",
            Self::GoToShip(_) => "go_to_ship",
            Self::DockPlanet(_) => "dock_planet",
            Self::PatrolPlanet(_) => "patrol_planet",
        }
    }
}

/// Thrust cap for a trip that must stop `stop_radius` short of its target.
///
/// Starts from `ceil(remaining + 1)`, limited by the engine speed, then
/// clamped to the whole distance left so the ship does not sail past the
/// stop radius. The clamp is floored at one, which departs from a strict
/// `speed <= remaining` bound: a ship less than one unit out still moves one
/// unit instead of stalling short of the radius forever.
#[must_use]
pub fn approach_speed(distance: f64, stop_radius: f64, max_speed: i32) -> i32 {
    let remaining = distance - stop_radius;
    let speed = (f64::from(max_speed)).min((remaining + 1.0).ceil()) as i32;
    let no_overshoot = (remaining.floor() as i32).max(1);
    speed.min(no_overshoot)
}

/// Shared body of the `GoTo*` tasks once the target position is known.
fn travel(
    ctx: &TaskContext<'_>,
    target: Position,
    stop_radius: f64,
    avoid_obstacles: bool,
) -> TaskStep {
    let distance = ctx.ship.distance_to_point(target);
    if distance <= stop_radius {
        return TaskStep::Completed;
    }

    let speed = approach_speed(distance, stop_radius, ctx.config.max_speed);
    // Aim one unit inside the stop radius so a sub-unit remainder still moves.
    let aim = ctx
        .ship
        .position
        .approach_point(target, (stop_radius - 1.0).max(0.0));
    TaskStep::Move(ctx.navigator.navigate(
        ctx.world,
        ctx.ship,
        aim,
        speed,
        avoid_obstacles,
        ctx.nav.max_corrections,
        ctx.nav.angular_step_rad(),
    ))
}

impl GoToPlanet {
    fn update(&self, ctx: &TaskContext<'_>) -> TaskStep {
        let Some(planet) = ctx.world.planet(self.planet) else {
            return TaskStep::Alarm(Issue::NoTarget);
        };
        if planet.is_hostile_to(ctx.world.my_player_id()) {
            tracing::debug!(ship = %ctx.ship.id, planet = %self.planet, "target planet captured");
            return TaskStep::Alarm(Issue::NoTarget);
        }
        if self.for_docking && planet.is_full() {
            tracing::debug!(ship = %ctx.ship.id, planet = %self.planet, "target planet full");
            return TaskStep::Alarm(Issue::NoTarget);
        }
        travel(ctx, planet.position, self.stop_radius, true)
    }
}

impl GoToShip {
    fn update(&self, ctx: &TaskContext<'_>) -> TaskStep {
        let Some(target) = ctx.world.ship(self.target_player, self.target_ship) else {
            return TaskStep::Alarm(Issue::NoTarget);
        };
        travel(ctx, target.position, self.stop_radius, !self.kamikaze)
    }
}

impl DockPlanet {
    fn update(&mut self, ctx: &TaskContext<'_>) -> TaskStep {
        if ctx.world.planet(self.planet).is_none() {
            return TaskStep::Alarm(Issue::NoTarget);
        }
        self.attempts += 1;
        if self.attempts > ctx.config.dock_attempt_limit {
            // Budget exhausted; docking may or may not have happened.
            return TaskStep::Completed;
        }
        TaskStep::Move(Some(Move::Dock {
            ship: ctx.ship.id,
            planet: self.planet,
        }))
    }
}

impl PatrolPlanet {
    /// Whether an orbit point keeps the padded distance from every map edge.
    fn in_bounds(point: Position, world: &dyn WorldView, padding: f64) -> bool {
        point.x >= padding
            && point.y >= padding
            && point.x <= world.width() - padding
            && point.y <= world.height() - padding
    }

    fn update(&mut self, ctx: &TaskContext<'_>) -> TaskStep {
        let Some(planet) = ctx.world.planet(self.planet) else {
            return TaskStep::Alarm(Issue::NoTarget);
        };

        if let Some(enemy) = nearest_enemy_ship(ctx.world, ctx.ship, |_| true) {
            if ctx.ship.distance_to(enemy) <= ctx.config.enemy_close_radius {
                return TaskStep::Alarm(Issue::EnemyClose);
            }
        }

        let center = planet.position;
        let current = *self
            .angle_deg
            .get_or_insert_with(|| center.orient_towards(ctx.ship.position).to_degrees());
        let padding = ctx.config.patrol_padding;
        let step = ctx.config.patrol_sweep_deg;

        let mut next = current + self.sweep.sign() * step;
        let mut point = center.offset(next.to_radians(), self.orbit_radius);
        if !Self::in_bounds(point, ctx.world, padding) {
            self.sweep = self.sweep.flipped();
            next = current + self.sweep.sign() * step;
            point = center.offset(next.to_radians(), self.orbit_radius);
        }
        self.angle_deg = Some(next.rem_euclid(360.0));

        TaskStep::Move(ctx.navigator.navigate(
            ctx.world,
            ctx.ship,
            point,
            ctx.config.max_speed,
            true,
            ctx.nav.max_corrections,
            ctx.nav.angular_step_rad(),
        ))
    }
}
