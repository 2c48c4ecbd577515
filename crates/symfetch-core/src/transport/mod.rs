//! Remote transport capability.
//!
//! A transport retrieves one named object from the endpoint directory and
//! streams it into a byte sink. The production transport speaks FTP through
//! libcurl; [`MemoryTransport`] serves canned objects for tests.

mod ftp;
mod memory;

pub use ftp::{CurlFtpTransport, TransferOptions};
pub use memory::MemoryTransport;

use crate::endpoint::{ArtifactName, RemoteEndpoint};
use crate::error::FetchError;
use std::io::Write;

/// Retrieve a named object from a remote endpoint.
///
/// Each call is one full connection cycle; implementations must release the
/// connection on every exit path. Returns the number of bytes written to
/// `sink`.
pub trait Transport {
    fn retrieve(
        &mut self,
        endpoint: &RemoteEndpoint,
        artifact: &ArtifactName,
        sink: &mut dyn Write,
    ) -> Result<u64, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn retrieve(
        &mut self,
        endpoint: &RemoteEndpoint,
        artifact: &ArtifactName,
        sink: &mut dyn Write,
    ) -> Result<u64, FetchError> {
        (**self).retrieve(endpoint, artifact, sink)
    }
}
