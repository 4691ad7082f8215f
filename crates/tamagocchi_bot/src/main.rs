//! Tamagocchi bot binary.
//!
//! # Usage
//!
//! ```bash
//! # Default configuration, logs in the working directory
//! tamagocchi
//!
//! # Tuned configuration with a JSON-lines turn trace
//! tamagocchi --config bot.ron --log-dir logs --trace logs/turns.jsonl
//! ```
//!
//! The engine launches the binary and speaks the line protocol over
//! stdin/stdout. Nothing but protocol lines may be printed to stdout.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tamagocchi_bot::logging::init_file_logging;
use tamagocchi_bot::{Connection, Result, TurnRunner, TurnTrace};
use tamagocchi_core::config::BotConfig;

#[derive(Parser)]
#[command(name = "tamagocchi")]
#[command(about = "Fleet bot for Halite-II style engines")]
#[command(version)]
struct Cli {
    /// RON file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name announced to the engine
    #[arg(short, long, default_value = "Tamagocchi")]
    name: String,

    /// Directory for the per-player log file
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Write a JSON line per turn to this file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<u64> {
    let config = match &cli.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut conn = Connection::new(stdin.lock(), stdout.lock());

    let init = conn.read_init()?;
    let log_path = init_file_logging(&cli.log_dir, init.my_id, &cli.name, cli.verbose)?;
    tracing::info!(
        player = %init.my_id,
        width = init.width,
        height = init.height,
        players = init.player_count(),
        planets = init.planet_count(),
        log = %log_path.display(),
        "game initialised"
    );

    let mut runner = TurnRunner::with_config(config, &init);
    if let Some(path) = &cli.trace {
        runner = runner.with_trace(TurnTrace::create(path)?);
    }

    conn.send_name(&cli.name)?;
    runner.run(&mut conn)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(turns) => {
            tracing::info!(turns, "game over");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "bot stopped");
            eprintln!("tamagocchi: {err}");
            ExitCode::FAILURE
        }
    }
}
