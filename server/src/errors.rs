//! Errors that stop the server.

use std::{error::Error, io::Error as IoError, net::SocketAddr};
use thiserror::Error;

/// Convenience alias.
type BoxError = Box<dyn Error + Send + Sync>;

/// Errors that may occur while starting or running the server.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerError {
    /// The log filter was invalid or a global subscriber was already installed.
    #[error("Failed to set up logging: {0}")]
    Logging(#[source] BoxError),
    /// The listening socket could not be bound.
    #[error("Unable to bind {address}: {source}")]
    Bind {
        /// The address that was requested.
        address: SocketAddr,
        /// The source error.
        #[source]
        source: IoError,
    },
    /// The server stopped with an error.
    #[error("Server on {address} failed: {source}")]
    Serve {
        /// The address being served on.
        address: SocketAddr,
        /// The source error.
        #[source]
        source: IoError,
    },
}
