//! Error types for the bot process.

use std::path::PathBuf;

use tamagocchi_core::error::BotError;
use thiserror::Error;

/// Result type alias using [`RunError`].
pub type Result<T> = std::result::Result<T, RunError>;

/// Result type alias using [`ProtocolError`].
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Failures reading or writing the engine's line protocol.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The engine closed its end of the pipe.
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    /// A line ended before all expected fields were read.
    #[error("Missing token: expected {0}")]
    MissingToken(&'static str),

    /// A field did not parse as a number.
    #[error("Invalid {field}: {value:?}")]
    BadNumber {
        /// Field being read.
        field: &'static str,
        /// Offending token.
        value: String,
    },

    /// A ship carried an unknown docking status code.
    #[error("Unknown docking status code {0}")]
    BadDockingStatus(u32),

    /// Reading stdin or writing stdout failed.
    #[error("Protocol I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything that can stop the bot process or spoil a turn.
#[derive(Debug, Error)]
pub enum RunError {
    /// Decision engine or configuration failure.
    #[error(transparent)]
    Core(#[from] BotError),

    /// Line protocol failure.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Turn trace could not be written.
    #[error("Failed to write turn trace: {0}")]
    Trace(#[from] serde_json::Error),

    /// A log or trace file could not be created.
    #[error("Failed to create '{}': {source}", path.display())]
    CreateFile {
        /// File being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A global tracing subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    Subscriber(String),
}
