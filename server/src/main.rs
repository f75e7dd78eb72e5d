//! Serve one of the example GraphQL schemas.

use async_graphql as _;
use async_graphql_axum as _;
use axum as _;
use bookshelf as _;
use bookshelf_server::{Config, ServerError, init_logging, run};
use clap::Parser as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = Config::parse();
    if config.print_schema {
        println!("{}", config.variant.sdl());
        return Ok(());
    }

    init_logging(&config.env_filter)?;
    run(config).await
}
