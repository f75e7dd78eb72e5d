//! Error types produced while resolving fields.

use regex::Error as RegexError;
use thiserror::Error;

/// Errors that may occur when resolving a single field.
///
/// Only [`InvalidPattern`](Self::InvalidPattern) is ever reported to clients. The lookup
/// variants are turned into `null` fields by the resolvers, see
/// [`resolvers`](crate::resolvers).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// A title filter could not be compiled as a regular expression. The message of the source
    /// error includes the offending pattern.
    #[error("Invalid title filter: {0}")]
    InvalidPattern(#[from] RegexError),
    /// An author index pointed past the end of the author collection.
    #[error("Author index {index} is out of range for {len} authors.")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The number of authors at the time of the lookup.
        len: usize,
    },
    /// There was no entry matching the lookup.
    #[error("There was no entry matching the lookup.")]
    NotFound,
}

impl ResolveError {
    /// Whether this error describes an absent value rather than a failure. Absent values are
    /// reported as `null` instead of as errors.
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::NotFound)
    }
}
