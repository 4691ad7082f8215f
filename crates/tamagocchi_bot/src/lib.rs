//! Bot process for the Tamagocchi fleet engine.
//!
//! Wraps [`tamagocchi_core`] in the engine's line protocol:
//!
//! - **stdin**: handshake, then one map line per turn
//! - **stdout**: bot name, then one command line per turn
//! - **log file**: `<log-dir>/<player>-<name>.log` (tracing output)
//!
//! See the [`protocol`] module for the wire format and [`runner`] for the
//! turn loop and its failure recovery.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod protocol;
pub mod runner;

pub use error::{ProtocolError, Result, RunError};
pub use protocol::{Connection, GameInit};
pub use runner::{TurnRecord, TurnRunner, TurnTrace};
