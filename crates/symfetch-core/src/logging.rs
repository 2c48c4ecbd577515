//! Tracing setup: append to a log file in the XDG state dir, or log to stderr.
//!
//! The filter comes from `RUST_LOG` when set, otherwise [`DEFAULT_FILTER`].

use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,symfetch=debug,symfetch_core=debug";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/symfetch/symfetch.log`; the directory is created if missing.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("symfetch")?;
    Ok(dirs.place_state_file("symfetch.log")?)
}

/// Install a subscriber writing plain-text events to the log file.
///
/// Returns the log path. Errors (unwritable state dir, subscriber already
/// set) are returned so the caller can use [`init_logging_stderr`] instead.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install file logger: {}", e))?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(path)
}

/// Stderr-only logging, used when the log file cannot be opened.
pub fn init_logging_stderr() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
    if installed.is_ok() {
        tracing::debug!("logging to stderr");
    }
}
