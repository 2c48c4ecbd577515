//! Remote endpoint and artifact naming.
//!
//! An artifact name doubles as the local file name and the remote object
//! name, so it must be a single path component. The endpoint renders the
//! `ftp://host[:port]/dir/.../name` URL that libcurl turns into
//! `CWD dir` + `RETR name`.

use crate::error::FetchError;
use std::fmt;
use url::Url;

/// Default FTP control port.
pub const DEFAULT_FTP_PORT: u16 = 21;

/// Validated artifact name: non-empty, a single path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn new(name: impl Into<String>) -> Result<Self, FetchError> {
        let name = name.into();
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return Err(FetchError::InvalidArtifact(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host and directory artifacts are served from. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    host: String,
    port: Option<u16>,
    directory: String,
}

impl RemoteEndpoint {
    /// `directory` is relative to the login directory; `a/b` changes into
    /// `a` then `b`. An empty directory retrieves from the login directory.
    /// Absolute directories (leading `/`) are rejected: the `ftp://` URL form
    /// used here cannot address the server root.
    pub fn new(
        host: impl Into<String>,
        port: Option<u16>,
        directory: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let host = host.into();
        if host.is_empty() || host.contains(['/', '@', '?', '#', ' ']) {
            return Err(FetchError::InvalidEndpoint(format!("bad host {:?}", host)));
        }
        let directory = directory.into();
        if directory.starts_with('/') {
            return Err(FetchError::InvalidEndpoint(format!(
                "directory {:?} must be relative to the login directory",
                directory
            )));
        }
        let endpoint = Self {
            host,
            port,
            directory,
        };
        // Fail early on anything the URL parser rejects.
        endpoint.base_url()?;
        Ok(endpoint)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_FTP_PORT)
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    fn base_url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("ftp://{}/", self.host))
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", self.host, e)))?;
        if let Some(port) = self.port {
            url.set_port(Some(port))
                .map_err(|_| FetchError::InvalidEndpoint(format!("bad port {}", port)))?;
        }
        Ok(url)
    }

    /// URL of `artifact` inside the endpoint directory.
    pub fn url_for(&self, artifact: &ArtifactName) -> Result<Url, FetchError> {
        let mut url = self.base_url()?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FetchError::InvalidEndpoint(format!("{} cannot carry a path", self.host))
            })?;
            segments.clear();
            for part in self.directory.split('/').filter(|p| !p.is_empty()) {
                segments.push(part);
            }
            segments.push(artifact.as_str());
        }
        Ok(url)
    }
}

impl fmt::Display for RemoteEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ftp://{}:{}/{}", self.host, self.port(), self.directory)
    }
}
