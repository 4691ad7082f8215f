//! # Tamagocchi Core
//!
//! Per-turn decision engine for a fleet bot.
//!
//! Every turn the [`manager::GameManager`] turns a read-only world snapshot
//! into exactly one command per friendly ship:
//!
//! - ships are bound to [`pilot::Pilot`]s, created and discarded as ships
//!   appear and die
//! - each pilot follows a [`goal::Goal`] (mine, attack, defend) that sequences
//!   [`task::Task`]s through an explicit transition table
//! - goals are handed out by a capacity-aware assignment policy
//! - the batch of moves is filtered for self-inflicted collisions
//!
//! The crate does no I/O. World state arrives through [`world::WorldView`]
//! and thrust planning goes through [`navigation::Navigator`], so tests can
//! swap either for fixtures.
//!
//! ## Crate Structure
//!
//! - [`world`] / [`entity`] - snapshot model and nearest-entity queries
//! - [`navigation`] - thrust planning with obstacle avoidance
//! - [`task`] / [`goal`] / [`pilot`] - the behavior hierarchy
//! - [`assignment`] - docking-capacity accounting and target choice
//! - [`collision`] - end-of-turn collision suppression
//! - [`manager`] - the turn orchestrator

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod assignment;
pub mod collision;
pub mod command;
pub mod config;
pub mod entity;
pub mod error;
pub mod goal;
pub mod manager;
pub mod math;
pub mod navigation;
pub mod pilot;
pub mod task;
pub mod world;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::command::Move;
    pub use crate::config::{BotConfig, NavProfile};
    pub use crate::entity::{DockingStatus, EntityRef, Planet, PlanetId, PlayerId, Ship, ShipId};
    pub use crate::error::{BotError, Result};
    pub use crate::goal::{Goal, GoalKind, Stage};
    pub use crate::manager::GameManager;
    pub use crate::math::Position;
    pub use crate::navigation::{Navigator, ObstacleNavigator};
    pub use crate::pilot::Pilot;
    pub use crate::task::{Issue, Task, TaskStep};
    pub use crate::world::{GameMap, WorldView};
}
