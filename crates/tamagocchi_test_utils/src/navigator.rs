//! Navigator stubs.

use std::cell::RefCell;

use tamagocchi_core::command::Move;
use tamagocchi_core::entity::{Ship, ShipId};
use tamagocchi_core::math::{angle_rad_to_deg_clipped, Position};
use tamagocchi_core::navigation::Navigator;
use tamagocchi_core::world::WorldView;

/// One recorded navigation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavRequest {
    /// Requesting ship.
    pub ship: ShipId,
    /// Where the ship started.
    pub from: Position,
    /// Requested target.
    pub target: Position,
    /// Speed cap passed by the task.
    pub max_speed: i32,
    /// Whether avoidance was requested.
    pub avoid_obstacles: bool,
    /// Correction budget.
    pub max_corrections: u32,
    /// Correction step in radians.
    pub angular_step_rad: f64,
}

/// Navigator that flies straight at the target and records every call.
///
/// The returned thrust uses the same magnitude rule as the real navigator
/// (`min(max_speed, floor(distance))`) but never avoids anything.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    requests: RefCell<Vec<NavRequest>>,
    refuse: bool,
}

impl RecordingNavigator {
    /// A navigator that always finds a path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A navigator that never finds a path.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            refuse: true,
        }
    }

    /// Every request so far.
    #[must_use]
    pub fn requests(&self) -> Vec<NavRequest> {
        self.requests.borrow().clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<NavRequest> {
        self.requests.borrow().last().copied()
    }

    /// Forget recorded requests.
    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(
        &self,
        _world: &dyn WorldView,
        ship: &Ship,
        target: Position,
        max_speed: i32,
        avoid_obstacles: bool,
        max_corrections: u32,
        angular_step_rad: f64,
    ) -> Option<Move> {
        tracing::trace!(ship = %ship.id, ?target, max_speed, avoid_obstacles, "navigation requested");
        self.requests.borrow_mut().push(NavRequest {
            ship: ship.id,
            from: ship.position,
            target,
            max_speed,
            avoid_obstacles,
            max_corrections,
            angular_step_rad,
        });
        if self.refuse {
            return None;
        }

        let distance = ship.distance_to_point(target);
        let magnitude = if distance < f64::from(max_speed) {
            distance as i32
        } else {
            max_speed
        };
        Some(Move::Thrust {
            ship: ship.id,
            angle_deg: angle_rad_to_deg_clipped(ship.position.orient_towards(target)),
            magnitude,
        })
    }
}
