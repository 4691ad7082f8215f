//! Per-player log file setup.
//!
//! Stdout carries the protocol, so logs go to `<log-dir>/<player>-<name>.log`.
//! The filter honours `RUST_LOG` and otherwise defaults to `info`
//! (`debug` with `--verbose`).

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tamagocchi_core::entity::PlayerId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Result, RunError};

/// Where the log for `player` running as `name` is written.
#[must_use]
pub fn log_file_path(dir: &Path, player: PlayerId, name: &str) -> PathBuf {
    dir.join(format!("{player}-{name}.log"))
}

/// Install the global subscriber writing to the player's log file.
///
/// Returns the log file path.
pub fn init_file_logging(dir: &Path, player: PlayerId, name: &str, verbose: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| RunError::CreateFile {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = log_file_path(dir, player, name);
    let file = File::create(&path).map_err(|source| RunError::CreateFile {
        path: path.clone(),
        source,
    })?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .map_err(|err| RunError::Subscriber(err.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_named_after_player_and_bot() {
        let path = log_file_path(Path::new("logs"), PlayerId(2), "Tamagocchi");
        assert_eq!(path, Path::new("logs").join("2-Tamagocchi.log"));
    }
}
