//! Error types for the decision engine.

use thiserror::Error;

use crate::entity::{PlayerId, ShipId};

/// Result type alias using [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;

/// Top-level error type for decision-engine failures.
///
/// Task-level trouble (a vanished target, an enemy nearby) is not an error;
/// those travel as [`crate::task::Issue`] values inside the goal hierarchy.
#[derive(Debug, Error)]
pub enum BotError {
    /// A piloted ship is missing from the current snapshot.
    #[error("Ship {ship} of player {player} not found in snapshot")]
    ShipNotFound {
        /// Owning player.
        player: PlayerId,
        /// Missing ship.
        ship: ShipId,
    },

    /// Failed to read a configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        /// Path to the file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Configuration values are out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
