//! Fetch error taxonomy.
//!
//! Every failure surfaces to the caller unchanged; nothing here is retried.
//! Transport errors from libcurl are mapped into these kinds by
//! [`classify_curl_error`].

mod classify;

pub use classify::classify_curl_error;

use thiserror::Error;

/// High-level classification of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Endpoint unreachable, DNS failure, dropped connection or timeout.
    Connection,
    /// Anonymous login refused.
    Authentication,
    /// Remote object (or its directory) does not exist.
    NotFound,
    /// Local storage could not be written.
    Io,
    /// Rejected input before any I/O happened.
    InvalidInput,
    /// Any other protocol-level failure.
    Other,
}

/// Error returned by a single conditional fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot reach remote endpoint: {0}")]
    Connection(String),

    #[error("anonymous login refused: {0}")]
    Authentication(String),

    #[error("remote object not found: {0}")]
    NotFound(String),

    #[error("local storage write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error("invalid artifact name {0:?}")]
    InvalidArtifact(String),

    #[error("invalid remote endpoint: {0}")]
    InvalidEndpoint(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Connection(_) => ErrorKind::Connection,
            FetchError::Authentication(_) => ErrorKind::Authentication,
            FetchError::NotFound(_) => ErrorKind::NotFound,
            FetchError::Io(_) => ErrorKind::Io,
            FetchError::Transfer(_) => ErrorKind::Other,
            FetchError::InvalidArtifact(_) | FetchError::InvalidEndpoint(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        let detail = match e.extra_description() {
            Some(extra) => format!("{} ({})", e.description(), extra),
            None => e.description().to_string(),
        };
        match classify_curl_error(&e) {
            ErrorKind::Connection => FetchError::Connection(detail),
            ErrorKind::Authentication => FetchError::Authentication(detail),
            ErrorKind::NotFound => FetchError::NotFound(detail),
            ErrorKind::Io => FetchError::Io(std::io::Error::other(detail)),
            ErrorKind::InvalidInput => FetchError::InvalidEndpoint(detail),
            ErrorKind::Other => FetchError::Transfer(detail),
        }
    }
}
