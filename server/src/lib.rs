//! HTTP server for the bookshelf GraphQL schemas.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod app_builder;
pub use app_builder::build_app;

pub mod config;
pub use config::{Config, Variant};

pub mod errors;
pub use errors::ServerError;

/// Install the global `tracing` subscriber, filtered by `directives`.
///
/// # Errors
///
/// Returns [`ServerError::Logging`] if the directives don't parse or a subscriber is already
/// installed.
#[inline]
pub fn init_logging(directives: &str) -> Result<(), ServerError> {
    let filter =
        EnvFilter::try_new(directives).map_err(|err| ServerError::Logging(Box::new(err)))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(ServerError::Logging)
}

/// Serve the configured variant until the server fails.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address can't be bound and [`ServerError::Serve`] if
/// serving stops with an error.
#[inline]
pub async fn run(config: Config) -> Result<(), ServerError> {
    let app = build_app(config.variant);
    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|source| ServerError::Bind {
            address: config.listen,
            source,
        })?;
    let address = listener.local_addr().map_err(|source| ServerError::Bind {
        address: config.listen,
        source,
    })?;

    info!(%address, variant = ?config.variant, "server is listening");
    axum::serve(listener, app)
        .await
        .map_err(|source| ServerError::Serve { address, source })
}
