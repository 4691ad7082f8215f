//! Point-to-point thrust planning.
//!
//! Tasks never compute thrust vectors themselves; they hand a target point to
//! a [`Navigator`]. The shipped [`ObstacleNavigator`] walks the heading around
//! the ship in fixed angular steps until the straight segment to the (rotated)
//! target clears every planet and ship.

use crate::command::Move;
use crate::config::SHIP_RADIUS;
use crate::entity::Ship;
use crate::math::{angle_rad_to_deg_clipped, segment_circle_intersect, Position};
use crate::world::WorldView;

/// Thrust planner contract.
pub trait Navigator {
    /// Plan a thrust for `ship` towards `target`.
    ///
    /// Returns `None` when no safe heading is found within `max_corrections`
    /// attempts.
    fn navigate(
        &self,
        world: &dyn WorldView,
        ship: &Ship,
        target: Position,
        max_speed: i32,
        avoid_obstacles: bool,
        max_corrections: u32,
        angular_step_rad: f64,
    ) -> Option<Move>;
}

/// Straight-line navigator that rotates its heading around obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleNavigator {
    /// Extra clearance added to every obstacle's radius.
    pub fudge: f64,
}

impl Default for ObstacleNavigator {
    fn default() -> Self {
        Self {
            fudge: SHIP_RADIUS + 0.1,
        }
    }
}

impl ObstacleNavigator {
    /// Create a navigator with clearance derived from the ship radius.
    #[must_use]
    pub fn new(ship_radius: f64) -> Self {
        Self {
            fudge: ship_radius + 0.1,
        }
    }

    /// Whether any planet or other ship blocks the segment from `ship` to `target`.
    fn path_blocked(&self, world: &dyn WorldView, ship: &Ship, target: Position) -> bool {
        let start = ship.position;
        let planet_hit = world.planets().values().any(|planet| {
            segment_circle_intersect(start, target, planet.position, planet.radius, self.fudge)
        });
        if planet_hit {
            return true;
        }
        world.all_ships().into_iter().any(|other| {
            !(other.id == ship.id && other.owner == ship.owner)
                && segment_circle_intersect(start, target, other.position, other.radius, self.fudge)
        })
    }
}

impl Navigator for ObstacleNavigator {
    fn navigate(
        &self,
        world: &dyn WorldView,
        ship: &Ship,
        target: Position,
        max_speed: i32,
        avoid_obstacles: bool,
        max_corrections: u32,
        angular_step_rad: f64,
    ) -> Option<Move> {
        let distance = ship.distance_to_point(target);
        let mut target = target;

        for _ in 0..max_corrections {
            let angle = ship.position.orient_towards(target);
            if avoid_obstacles && self.path_blocked(world, ship, target) {
                target = ship.position.offset(angle + angular_step_rad, distance);
                continue;
            }

            let magnitude = if distance < f64::from(max_speed) {
                distance as i32
            } else {
                max_speed
            };
            return Some(Move::Thrust {
                ship: ship.id,
                angle_deg: angle_rad_to_deg_clipped(angle),
                magnitude,
            });
        }

        tracing::debug!(ship = %ship.id, "no clear heading within {} corrections", max_corrections);
        None
    }
}
