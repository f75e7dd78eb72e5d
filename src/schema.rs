//! GraphQL schemas for both datasets, built on `async-graphql`.
//!
//! The schemas only bind fields to [`resolvers`](crate::resolvers); parsing, validation and
//! serialization are left to the engine.

pub mod embedded;
pub mod indexed;

pub use embedded::EmbeddedSchema;
pub use indexed::IndexedSchema;

/// Wrap every item so the list is exposed as `[T]` rather than `[T!]`.
pub(crate) fn nullable_items<T>(items: Vec<T>) -> Vec<Option<T>> {
    items.into_iter().map(Some).collect()
}
