//! Fetch command: ensure every configured artifact exists locally.

use anyhow::{Context, Result};
use std::path::PathBuf;
use symfetch_core::config::FetchConfig;
use symfetch_core::transport::CurlFtpTransport;
use symfetch_core::{ConditionalFetcher, FetchOutcome, FetchReport};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub artifacts: Vec<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub directory: Option<String>,
    pub dest: Option<PathBuf>,
}

pub fn apply_overrides(cfg: &mut FetchConfig, o: Overrides) {
    if !o.artifacts.is_empty() {
        cfg.artifacts = o.artifacts;
    }
    if let Some(host) = o.host {
        cfg.host = host;
    }
    if o.port.is_some() {
        cfg.port = o.port;
    }
    if let Some(directory) = o.directory {
        cfg.directory = directory;
    }
    if o.dest.is_some() {
        cfg.dest_dir = o.dest;
    }
}

/// One output line per artifact: `skipped` when a local copy existed,
/// `fetched N bytes` otherwise.
pub fn format_report(report: &FetchReport) -> String {
    match report.outcome {
        FetchOutcome::AlreadyPresent => {
            format!("skipped  {}  {}", report.artifact, report.path.display())
        }
        FetchOutcome::Fetched { bytes } => format!(
            "fetched {} bytes  {}  {}",
            bytes,
            report.artifact,
            report.path.display()
        ),
    }
}

/// Run the sequential driver; the first failure aborts the remaining artifacts.
pub fn run_fetch(cfg: &FetchConfig) -> Result<()> {
    let endpoint = cfg.endpoint()?;
    let artifacts = cfg.artifact_names()?;
    let dest_dir = cfg.resolved_dest_dir()?;
    tracing::info!(
        endpoint = %endpoint,
        dest = %dest_dir.display(),
        count = artifacts.len(),
        "fetch run"
    );

    let transport = CurlFtpTransport::new(cfg.transfer_options());
    let mut fetcher = ConditionalFetcher::new(transport, endpoint, dest_dir);
    let reports = fetcher
        .fetch_all(&artifacts)
        .with_context(|| format!("fetching from {}", fetcher.endpoint()))?;

    for report in &reports {
        println!("{}", format_report(report));
    }
    Ok(())
}
