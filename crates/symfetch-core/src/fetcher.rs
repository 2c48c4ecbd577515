//! Conditional fetch: retrieve an artifact only when no local copy exists.
//!
//! Presence is decided by the final file name alone. A present artifact is
//! never re-fetched or overwritten; an absent one is streamed into a `.part`
//! file and renamed into place once the transfer completes.

use crate::endpoint::{ArtifactName, RemoteEndpoint};
use crate::error::FetchError;
use crate::storage::{self, PartFile};
use crate::transport::{CurlFtpTransport, Transport};
use std::path::PathBuf;

/// What `ensure_local` did for one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A local copy existed; no network access happened.
    AlreadyPresent,
    /// The artifact was retrieved; `bytes` were written.
    Fetched { bytes: u64 },
}

/// Per-artifact result of a driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub artifact: ArtifactName,
    pub path: PathBuf,
    pub outcome: FetchOutcome,
}

/// Ensures named artifacts exist under `dest_dir`, fetching them from one endpoint.
#[derive(Debug)]
pub struct ConditionalFetcher<T> {
    transport: T,
    endpoint: RemoteEndpoint,
    dest_dir: PathBuf,
}

impl<T: Transport> ConditionalFetcher<T> {
    pub fn new(transport: T, endpoint: RemoteEndpoint, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            endpoint,
            dest_dir: dest_dir.into(),
        }
    }

    pub fn endpoint(&self) -> &RemoteEndpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Local path an artifact is stored at.
    pub fn local_path(&self, artifact: &ArtifactName) -> PathBuf {
        self.dest_dir.join(artifact.as_str())
    }

    /// Make sure `artifact` exists locally, retrieving it if absent.
    pub fn ensure_local(&mut self, artifact: &ArtifactName) -> Result<FetchOutcome, FetchError> {
        let final_path = self.local_path(artifact);
        if storage::is_present(&final_path) {
            tracing::info!(artifact = %artifact, path = %final_path.display(), "already present, skipping");
            return Ok(FetchOutcome::AlreadyPresent);
        }

        tracing::info!(artifact = %artifact, endpoint = %self.endpoint, "fetching");
        let mut part = PartFile::create(&final_path)?;
        let bytes = match self.transport.retrieve(&self.endpoint, artifact, &mut part) {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(artifact = %artifact, kind = ?e.kind(), "fetch failed: {}", e);
                return Err(e);
            }
        };
        part.finalize()?;

        tracing::info!(artifact = %artifact, bytes, path = %final_path.display(), "fetched");
        Ok(FetchOutcome::Fetched { bytes })
    }

    /// Ensure each artifact in order. The first failure aborts the run and
    /// later artifacts are not attempted.
    pub fn fetch_all<'a, I>(&mut self, artifacts: I) -> Result<Vec<FetchReport>, FetchError>
    where
        I: IntoIterator<Item = &'a ArtifactName>,
    {
        let mut reports = Vec::new();
        for artifact in artifacts {
            let outcome = self.ensure_local(artifact)?;
            reports.push(FetchReport {
                artifact: artifact.clone(),
                path: self.local_path(artifact),
                outcome,
            });
        }
        Ok(reports)
    }
}

/// Ensure `artifact_name` exists in the current directory, fetching it by
/// anonymous FTP from `remote_directory` on `remote_host` when absent.
pub fn ensure_local(
    artifact_name: &str,
    remote_host: &str,
    remote_directory: &str,
) -> Result<FetchOutcome, FetchError> {
    let artifact = ArtifactName::new(artifact_name)?;
    let endpoint = RemoteEndpoint::new(remote_host, None, remote_directory)?;
    let dest_dir = std::env::current_dir()?;
    ConditionalFetcher::new(CurlFtpTransport::default(), endpoint, dest_dir).ensure_local(&artifact)
}
