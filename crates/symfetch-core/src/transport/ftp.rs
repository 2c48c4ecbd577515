//! FTP transport over libcurl.
//!
//! libcurl performs the whole session for an `ftp://` URL: anonymous
//! USER/PASS, CWD into each directory segment, passive data connection,
//! `TYPE I` (libcurl's default), RETR, and QUIT when the handle's
//! connection is closed.

use super::Transport;
use crate::endpoint::{ArtifactName, RemoteEndpoint};
use crate::error::FetchError;
use std::io::{self, Write};
use std::time::Duration;

/// Timeouts for one retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Time allowed to establish the control connection.
    pub connect_timeout: Duration,
    /// Upper bound on the whole retrieval. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: None,
        }
    }
}

/// Anonymous FTP retrieval, one connection per call.
#[derive(Debug, Clone, Default)]
pub struct CurlFtpTransport {
    options: TransferOptions,
}

impl CurlFtpTransport {
    pub fn new(options: TransferOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransferOptions {
        &self.options
    }
}

impl Transport for CurlFtpTransport {
    fn retrieve(
        &mut self,
        endpoint: &RemoteEndpoint,
        artifact: &ArtifactName,
        sink: &mut dyn Write,
    ) -> Result<u64, FetchError> {
        let url = endpoint.url_for(artifact)?;
        tracing::debug!(url = %url, "ftp retrieve");

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        // The connection is closed (QUIT) when this transfer ends, never pooled.
        easy.forbid_reuse(true)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        if let Some(timeout) = self.options.timeout {
            easy.timeout(timeout)?;
        }

        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;
        let result = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match sink.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            tracing::warn!(artifact = %artifact, "local write failed mid-transfer: {}", e);
            return Err(FetchError::Io(e));
        }
        result?;
        sink.flush()?;

        tracing::debug!(artifact = %artifact, bytes = written, "ftp retrieve complete");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_have_connect_timeout_only() {
        let t = CurlFtpTransport::default();
        assert_eq!(t.options().connect_timeout, Duration::from_secs(30));
        assert!(t.options().timeout.is_none());
    }

    #[test]
    fn unreachable_port_is_connection_error() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let ep = RemoteEndpoint::new("127.0.0.1", Some(port), "symboldirectory").unwrap();
        let name = ArtifactName::new("nasdaqlisted.txt").unwrap();
        let mut sink = Vec::new();
        let mut t = CurlFtpTransport::new(TransferOptions {
            connect_timeout: Duration::from_secs(5),
            timeout: Some(Duration::from_secs(10)),
        });
        let err = t.retrieve(&ep, &name, &mut sink).unwrap_err();
        assert!(matches!(err, FetchError::Connection(_)), "got {:?}", err);
        assert!(sink.is_empty());
    }
}
