//! Authors and books served over GraphQL.
//!
//! Two datasets are provided. The [`embedded`](dataset::embedded) one stores each author inside
//! the books they wrote, while the [indexed](dataset::Store) one refers to authors by position
//! and supports relationship traversal in both directions as well as creating authors.
//! [`resolvers`] holds the field logic for the latter; [`schema`] binds both to
//! `async-graphql`.

pub mod errors;

pub mod dataset;
pub use dataset::{Author, AuthorId, AuthorRecord, Book, Store};

pub mod resolvers;

pub mod schema;

