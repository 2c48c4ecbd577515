//! Status command: show local presence of each configured artifact.

use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use symfetch_core::config::FetchConfig;
use symfetch_core::ArtifactName;

/// `size` is the local file size, or None when the artifact is absent.
pub fn status_line(artifact: &ArtifactName, size: Option<u64>) -> String {
    match size {
        Some(bytes) => format!("present  {}  ({} bytes)", artifact, bytes),
        None => format!("absent   {}", artifact),
    }
}

/// Size of the local file, `None` if it does not exist. Any other I/O
/// failure (permissions, not a directory) is an error, not absence.
pub fn local_size(path: &Path) -> Result<Option<u64>> {
    match std::fs::metadata(path) {
        Ok(m) => Ok(Some(m.len())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("inspect {}", path.display())),
    }
}

pub fn run_status(cfg: &FetchConfig) -> Result<()> {
    let dest_dir = cfg.resolved_dest_dir()?;
    println!("{}  ->  {}", cfg.endpoint()?, dest_dir.display());
    for artifact in cfg.artifact_names()? {
        let path = dest_dir.join(artifact.as_str());
        let size = local_size(&path)?;
        println!("{}", status_line(&artifact, size));
    }
    Ok(())
}
