//! Logging setup.
//!
//! The terminal belongs to the UI while the workshop runs, so the main binary
//! logs to ~/.teacraft/teacraft.log. The headless simulator logs to stderr.

use super::persistence::data_path;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "teacraft.log";

/// `RUST_LOG` if set, otherwise `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Append a session header and route all events into the log file.
/// Returns the log path.
pub fn init_file_logging(default_filter: &str) -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE)?;
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(
        file,
        "{}\nteacraft session - {}\n{}",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    )?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(path)
}

/// Log to stderr. Does nothing if a subscriber is already installed.
pub fn init_stderr_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(io::stderr)
        .try_init();
}
