pub mod config;
pub mod logging;

pub mod checksum;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod storage;
pub mod transport;

pub use endpoint::{ArtifactName, RemoteEndpoint};
pub use error::{ErrorKind, FetchError};
pub use fetcher::{ConditionalFetcher, FetchOutcome, FetchReport};
pub use transport::Transport;
