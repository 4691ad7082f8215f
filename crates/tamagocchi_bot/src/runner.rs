//! Turn loop with error recovery.
//!
//! A turn that fails to parse, returns an engine error or panics must not
//! cost the game: the failure is logged and the previous turn's commands are
//! sent again. Only end of input stops the loop.

use std::any::Any;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tamagocchi_core::command::Move;
use tamagocchi_core::config::BotConfig;
use tamagocchi_core::entity::PlayerId;
use tamagocchi_core::manager::GameManager;
use tamagocchi_core::navigation::{Navigator, ObstacleNavigator};

use crate::error::{ProtocolError, Result, RunError};
use crate::protocol::{encode_moves, parse_map, Connection, GameInit};

/// One line of the JSON turn trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number, starting at 1.
    pub turn: u64,
    /// Whether the turn failed and the previous commands were resent.
    pub recovered: bool,
    /// Commands sent to the engine.
    pub moves: Vec<Move>,
}

/// JSON-lines sink for [`TurnRecord`]s.
#[derive(Debug)]
pub struct TurnTrace {
    writer: BufWriter<File>,
}

impl TurnTrace {
    /// Create (or truncate) the trace file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| RunError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append one record and flush it.
    pub fn record(&mut self, record: &TurnRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer
            .write_all(b"\n")
            .and_then(|()| self.writer.flush())
            .map_err(serde_json::Error::io)?;
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Drives a [`GameManager`] from engine map lines.
#[derive(Debug)]
pub struct TurnRunner<N = ObstacleNavigator> {
    manager: GameManager<N>,
    my_id: PlayerId,
    width: f64,
    height: f64,
    turn: u64,
    last_moves: Vec<Move>,
    trace: Option<TurnTrace>,
}

impl TurnRunner<ObstacleNavigator> {
    /// Runner with the shipped navigator.
    #[must_use]
    pub fn with_config(config: BotConfig, init: &GameInit) -> Self {
        let navigator = ObstacleNavigator::new(config.ship_radius);
        Self::new(GameManager::new(config, navigator), init)
    }
}

impl<N: Navigator> TurnRunner<N> {
    /// Runner for the game described by `init`.
    #[must_use]
    pub fn new(manager: GameManager<N>, init: &GameInit) -> Self {
        Self {
            manager,
            my_id: init.my_id,
            width: init.width,
            height: init.height,
            turn: 0,
            last_moves: Vec::new(),
            trace: None,
        }
    }

    /// Record every turn to `trace`.
    #[must_use]
    pub fn with_trace(mut self, trace: TurnTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// The wrapped manager.
    #[must_use]
    pub const fn manager(&self) -> &GameManager<N> {
        &self.manager
    }

    /// Turns played so far, including failed ones.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    fn compute(&mut self, line: &str) -> Result<Vec<Move>> {
        let map = parse_map(line, self.my_id, self.width, self.height)?;
        Ok(self.manager.update(&map)?)
    }

    /// Compute the commands for one map line, falling back to the previous
    /// turn's commands on any failure.
    pub fn play_turn(&mut self, line: &str) -> Vec<Move> {
        self.turn += 1;
        let turn = self.turn;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.compute(line)));
        let (moves, recovered) = match outcome {
            Ok(Ok(moves)) => {
                self.last_moves.clone_from(&moves);
                (moves, false)
            }
            Ok(Err(err)) => {
                tracing::error!(turn, error = %err, "turn failed, resending previous commands");
                (self.last_moves.clone(), true)
            }
            Err(payload) => {
                tracing::error!(
                    turn,
                    panic = panic_message(payload.as_ref()),
                    "turn panicked, resending previous commands"
                );
                (self.last_moves.clone(), true)
            }
        };

        let failed = self.trace.as_mut().and_then(|trace| {
            trace
                .record(&TurnRecord {
                    turn,
                    recovered,
                    moves: moves.clone(),
                })
                .err()
        });
        if let Some(err) = failed {
            tracing::warn!(error = %err, "turn trace disabled");
            self.trace = None;
        }

        moves
    }

    /// Play turns until the engine closes the input.
    ///
    /// Returns the number of turns played.
    pub fn run<R: BufRead, W: Write>(&mut self, conn: &mut Connection<R, W>) -> Result<u64> {
        loop {
            let line = match conn.read_line("turn map") {
                Ok(line) => line,
                Err(ProtocolError::UnexpectedEof(_)) => {
                    tracing::info!(turns = self.turn, "engine closed the game");
                    return Ok(self.turn);
                }
                Err(err) => return Err(err.into()),
            };
            let moves = self.play_turn(&line);
            conn.send_line(&encode_moves(&moves))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_payloads() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(literal.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_record_serializes_tagged_moves() {
        let record = TurnRecord {
            turn: 3,
            recovered: false,
            moves: vec![Move::Undock {
                ship: tamagocchi_core::entity::ShipId(4),
            }],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"turn":3,"recovered":false,"moves":[{"type":"undock","ship":4}]}"#
        );
    }
}
