//! Suppression of self-inflicted collisions among one turn's moves.
//!
//! Each thrust is projected to the ship's end-of-turn position. When two
//! projections land closer than `collision_factor * ship_radius`, the earlier
//! move in the batch is replaced by a zero-magnitude thrust on the same
//! heading.
//!
//! The pass is single and order dependent: a cancelled move is never
//! compared again, and the projections of later moves are not revised, so
//! three or more mutually conflicting ships can still collide.

use crate::command::Move;
use crate::config::BotConfig;
use crate::math::{thrust_destination, Position};
use crate::world::WorldView;

fn predicted_position(world: &dyn WorldView, command: &Move) -> Option<Position> {
    match *command {
        Move::Thrust {
            ship,
            angle_deg,
            magnitude,
        } => world
            .ship(world.my_player_id(), ship)
            .map(|ship| thrust_destination(ship.position, angle_deg, magnitude)),
        Move::Dock { .. } | Move::Undock { .. } => None,
    }
}

/// Cancel the earlier of every conflicting pair of thrusts.
///
/// Returns the number of cancelled moves.
pub fn resolve_collisions(world: &dyn WorldView, moves: &mut [Move], config: &BotConfig) -> usize {
    let min_distance = config.collision_distance();
    let predicted: Vec<Option<Position>> = moves
        .iter()
        .map(|command| predicted_position(world, command))
        .collect();

    let mut cancelled = 0;
    for i in 0..moves.len() {
        let Some(first) = predicted[i] else {
            continue;
        };
        for j in (i + 1)..moves.len() {
            let Some(second) = predicted[j] else {
                continue;
            };
            if first.distance_to(second) < min_distance {
                tracing::debug!(
                    ship = %moves[i].ship(),
                    other = %moves[j].ship(),
                    "cancelling thrust to avoid collision"
                );
                moves[i] = moves[i].halted();
                cancelled += 1;
                break;
            }
        }
    }
    cancelled
}
