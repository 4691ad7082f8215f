//! Halite-II style line protocol.
//!
//! The engine talks over stdin/stdout, one line per message:
//!
//! ```text
//! -> 0                       player id
//! -> 240 160                 map width and height
//! -> <map line>              initial snapshot
//! <- Tamagocchi              bot name
//! -> <map line>              every turn
//! <- t 0 7 90 d 1 3          every turn, one command per ship
//! ```
//!
//! A map line is a flat whitespace-separated token stream:
//!
//! ```text
//! nplayers (player nships (id x y hp vx vy status planet progress cooldown)*)*
//! nplanets (id x y hp radius spots production remaining owned owner ndocked ship*)*
//! ```

use std::io::{BufRead, Write};
use std::str::{FromStr, SplitWhitespace};

use tamagocchi_core::command::Move;
use tamagocchi_core::config::SHIP_RADIUS;
use tamagocchi_core::entity::{DockingStatus, Planet, PlanetId, PlayerId, Ship, ShipId};
use tamagocchi_core::math::Position;
use tamagocchi_core::world::{GameMap, WorldView};

use crate::error::{ProtocolError, ProtocolResult};

/// Cursor over the tokens of one line.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            inner: line.split_whitespace(),
        }
    }

    fn next<T: FromStr>(&mut self, field: &'static str) -> ProtocolResult<T> {
        let token = self
            .inner
            .next()
            .ok_or(ProtocolError::MissingToken(field))?;
        token.parse().map_err(|_| ProtocolError::BadNumber {
            field,
            value: token.to_string(),
        })
    }
}

/// Everything the engine sends before the first turn.
#[derive(Debug, Clone)]
pub struct GameInit {
    /// The player this bot controls.
    pub my_id: PlayerId,
    /// Map width.
    pub width: f64,
    /// Map height.
    pub height: f64,
    /// Snapshot sent with the handshake.
    pub initial: GameMap,
}

impl GameInit {
    /// Number of players in the initial snapshot.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.initial.players().len()
    }

    /// Number of planets in the initial snapshot.
    #[must_use]
    pub fn planet_count(&self) -> usize {
        self.initial.planets().len()
    }
}

/// Parse the first handshake line.
pub fn parse_player_id(line: &str) -> ProtocolResult<PlayerId> {
    Tokens::new(line).next("player id").map(PlayerId)
}

/// Parse the `width height` handshake line.
pub fn parse_dimensions(line: &str) -> ProtocolResult<(f64, f64)> {
    let mut tokens = Tokens::new(line);
    Ok((tokens.next("map width")?, tokens.next("map height")?))
}

fn parse_ship(tokens: &mut Tokens<'_>, owner: PlayerId) -> ProtocolResult<Ship> {
    let id = ShipId(tokens.next("ship id")?);
    let x = tokens.next("ship x")?;
    let y = tokens.next("ship y")?;
    let health = tokens.next("ship health")?;
    // Velocity is deprecated by the engine and always zero.
    let _: f64 = tokens.next("ship velocity x")?;
    let _: f64 = tokens.next("ship velocity y")?;
    let code = tokens.next("docking status")?;
    let docking_status =
        DockingStatus::from_code(code).ok_or(ProtocolError::BadDockingStatus(code))?;
    let planet = PlanetId(tokens.next("docked planet")?);
    let docking_progress = tokens.next("docking progress")?;
    let weapon_cooldown = tokens.next("weapon cooldown")?;

    Ok(Ship {
        id,
        owner,
        position: Position::new(x, y),
        radius: SHIP_RADIUS,
        health,
        docking_status,
        docked_planet: (docking_status != DockingStatus::Undocked).then_some(planet),
        docking_progress,
        weapon_cooldown,
    })
}

fn parse_planet(tokens: &mut Tokens<'_>) -> ProtocolResult<Planet> {
    let id = PlanetId(tokens.next("planet id")?);
    let x = tokens.next("planet x")?;
    let y = tokens.next("planet y")?;
    let health = tokens.next("planet health")?;
    let radius = tokens.next("planet radius")?;
    let docking_spots = tokens.next("docking spots")?;
    let current_production = tokens.next("current production")?;
    let remaining_production = tokens.next("remaining production")?;
    let owned: u32 = tokens.next("owned flag")?;
    let owner = PlayerId(tokens.next("planet owner")?);
    let docked: usize = tokens.next("docked ship count")?;
    let docked_ships = (0..docked)
        .map(|_| tokens.next("docked ship id").map(ShipId))
        .collect::<ProtocolResult<Vec<_>>>()?;

    Ok(Planet {
        id,
        position: Position::new(x, y),
        radius,
        health,
        docking_spots,
        current_production,
        remaining_production,
        owner: (owned != 0).then_some(owner),
        docked_ships,
    })
}

/// Parse one map line into a snapshot for `my_id`.
pub fn parse_map(line: &str, my_id: PlayerId, width: f64, height: f64) -> ProtocolResult<GameMap> {
    let mut tokens = Tokens::new(line);
    let mut map = GameMap::new(my_id, width, height);

    let players: usize = tokens.next("player count")?;
    for _ in 0..players {
        let player = PlayerId(tokens.next("player id")?);
        map.add_player(player);
        let ships: usize = tokens.next("ship count")?;
        for _ in 0..ships {
            map.insert_ship(parse_ship(&mut tokens, player)?);
        }
    }

    let planets: usize = tokens.next("planet count")?;
    for _ in 0..planets {
        map.insert_planet(parse_planet(&mut tokens)?);
    }

    Ok(map)
}

/// Encode one turn's commands as a single line (without the newline).
#[must_use]
pub fn encode_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line-oriented connection to the game engine.
#[derive(Debug)]
pub struct Connection<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Connection<R, W> {
    /// Wrap an engine input and output.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read one line without its terminator.
    ///
    /// Invalid UTF-8 is replaced rather than rejected so a corrupt turn line
    /// fails in parsing, where the runner can recover from it.
    pub fn read_line(&mut self, what: &'static str) -> ProtocolResult<String> {
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(ProtocolError::UnexpectedEof(what));
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Write one line and flush it.
    pub fn send_line(&mut self, line: &str) -> ProtocolResult<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read the player id, map size and initial snapshot.
    ///
    /// The engine waits for [`Connection::send_name`] before the first turn.
    pub fn read_init(&mut self) -> ProtocolResult<GameInit> {
        let my_id = parse_player_id(&self.read_line("player id")?)?;
        let (width, height) = parse_dimensions(&self.read_line("map dimensions")?)?;
        let initial = parse_map(&self.read_line("initial map")?, my_id, width, height)?;
        Ok(GameInit {
            my_id,
            width,
            height,
            initial,
        })
    }

    /// Finish the handshake.
    pub fn send_name(&mut self, name: &str) -> ProtocolResult<()> {
        self.send_line(name)
    }

    /// The engine-facing writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}
