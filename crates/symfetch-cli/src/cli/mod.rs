//! CLI for symfetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use symfetch_core::config::{self, FetchConfig};

use commands::{apply_overrides, run_checksum, run_fetch, run_status, Overrides};

/// Top-level CLI for symfetch.
#[derive(Debug, Parser)]
#[command(name = "symfetch")]
#[command(about = "symfetch: fetch FTP artifacts once, keep local copies", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/symfetch/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every artifact that has no local copy yet.
    Fetch {
        /// Artifact names to ensure (default: the configured list).
        artifacts: Vec<String>,

        /// FTP host to fetch from.
        #[arg(long)]
        host: Option<String>,

        /// FTP control port (default 21).
        #[arg(long)]
        port: Option<u16>,

        /// Remote directory holding the artifacts.
        #[arg(long)]
        directory: Option<String>,

        /// Local directory to store artifacts in (default: current directory).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Show which configured artifacts exist locally (no network access).
    Status {
        /// Local directory to inspect (default: configured or current directory).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Compute SHA-256 of a file (e.g. a fetched artifact).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

fn load_config(path: Option<&Path>) -> Result<FetchConfig> {
    let cfg = match path {
        Some(p) => config::load_from(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                artifacts,
                host,
                port,
                directory,
                dest,
            } => {
                let mut cfg = load_config(cli.config.as_deref())?;
                apply_overrides(
                    &mut cfg,
                    Overrides {
                        artifacts,
                        host,
                        port,
                        directory,
                        dest,
                    },
                );
                run_fetch(&cfg)?;
            }
            CliCommand::Status { dest } => {
                let mut cfg = load_config(cli.config.as_deref())?;
                apply_overrides(
                    &mut cfg,
                    Overrides {
                        dest,
                        ..Overrides::default()
                    },
                );
                run_status(&cfg)?;
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
