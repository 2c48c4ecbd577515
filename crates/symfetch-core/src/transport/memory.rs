//! In-memory transport: serves canned objects and records every retrieval.

use super::Transport;
use crate::endpoint::{ArtifactName, RemoteEndpoint};
use crate::error::FetchError;
use std::collections::HashMap;
use std::io::Write;

/// Transport double keyed by `(directory, name)`.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    objects: HashMap<(String, String), Vec<u8>>,
    retrievals: Vec<String>,
    refuse_login: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` as `name` inside `directory`.
    pub fn with_object(
        mut self,
        directory: impl Into<String>,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.objects
            .insert((directory.into(), name.into()), bytes.into());
        self
    }

    /// Reject every retrieval as if anonymous login were refused.
    pub fn refusing_login(mut self) -> Self {
        self.refuse_login = true;
        self
    }

    /// Names requested so far, in order.
    pub fn retrievals(&self) -> &[String] {
        &self.retrievals
    }
}

impl Transport for MemoryTransport {
    fn retrieve(
        &mut self,
        endpoint: &RemoteEndpoint,
        artifact: &ArtifactName,
        sink: &mut dyn Write,
    ) -> Result<u64, FetchError> {
        self.retrievals.push(artifact.to_string());
        if self.refuse_login {
            return Err(FetchError::Authentication(format!(
                "{} refused anonymous login",
                endpoint.host()
            )));
        }
        let key = (endpoint.directory().to_string(), artifact.to_string());
        let bytes = self
            .objects
            .get(&key)
            .ok_or_else(|| FetchError::NotFound(format!("{}/{}", key.0, key.1)))?;
        sink.write_all(bytes)?;
        Ok(bytes.len() as u64)
    }
}
