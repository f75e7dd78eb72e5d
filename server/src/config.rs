//! Command line and environment configuration.

use bookshelf::{
    Store,
    dataset::embedded::EmbeddedCatalog,
    schema::{embedded, indexed},
};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// The address served on unless configured otherwise.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8081";

/// Options for the server.
#[derive(Clone, Debug, Parser)]
#[command(name = "bookshelf", version, about)]
pub struct Config {
    /// Address to serve on.
    #[arg(long, env = "BOOKSHELF_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Which dataset and schema to serve.
    #[arg(long, env = "BOOKSHELF_VARIANT", value_enum, default_value_t = Variant::Indexed)]
    pub variant: Variant,

    /// Log filter, e.g. `info` or `bookshelf=debug`.
    #[arg(long = "log", env = "BOOKSHELF_LOG", default_value = "info")]
    pub env_filter: String,

    /// Print the schema of the selected variant and exit.
    #[arg(long)]
    pub print_schema: bool,
}

/// The two example servers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Books embed their author; only `books` and `authors` can be queried.
    Embedded,
    /// Books refer to authors by position; relationships and `createAuthor` are available.
    Indexed,
}

impl Variant {
    /// The schema of this variant in SDL.
    #[inline]
    #[must_use]
    pub fn sdl(self) -> String {
        match self {
            Self::Embedded => embedded::build(EmbeddedCatalog::seeded()).sdl(),
            Self::Indexed => indexed::build(Store::seeded()).sdl(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Panics simply indicate failed tests.")]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["bookshelf"]).unwrap();
        assert_eq!(config.listen, DEFAULT_LISTEN.parse().unwrap());
        assert_eq!(config.variant, Variant::Indexed);
        assert_eq!(config.env_filter, "info");
        assert!(!config.print_schema);
    }

    #[test]
    fn explicit_options() {
        let config = Config::try_parse_from([
            "bookshelf",
            "--listen",
            "0.0.0.0:4000",
            "--variant",
            "embedded",
            "--log",
            "debug",
            "--print-schema",
        ])
        .unwrap();
        assert_eq!(config.listen.port(), 4000);
        assert_eq!(config.variant, Variant::Embedded);
        assert_eq!(config.env_filter, "debug");
        assert!(config.print_schema);
    }

    #[test]
    fn rejects_unknown_variant() {
        let _err = Config::try_parse_from(["bookshelf", "--variant", "sharded"]).unwrap_err();
    }

    #[test]
    fn schemas_differ() {
        let embedded = Variant::Embedded.sdl();
        let indexed = Variant::Indexed.sdl();

        assert!(!embedded.contains("createAuthor"));
        assert!(indexed.contains("createAuthor"));
        assert!(embedded.contains("type Book"));
        assert!(embedded.contains("books: [Book]\n"));
        assert!(embedded.contains("title: String\n"));
        assert!(indexed.contains("authors: [Author]\n"));
    }
}
