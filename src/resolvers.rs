//! Resolvers for the indexed dataset.
//!
//! Each resolver computes one field from a [`Store`], the arguments of the field and, for
//! relationship fields, the parent object the engine has already resolved. Arguments and
//! parents are passed as one parameter struct per operation.
//!
//! Lookups that find nothing produce [`None`] rather than an error, so that a missing author or
//! book only nulls the field that asked for it. The only error reported to callers is a title
//! filter that does not compile.

use crate::{
    dataset::{Author, AuthorId, AuthorRecord, Book, Store},
    errors::ResolveError,
};
use regex::Regex;
use tracing::{debug, info, warn};

/// Parameters of [`author`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorArgs<'a> {
    /// An explicit position. Takes precedence over `parent`.
    pub index: Option<i32>,
    /// The book whose author is being resolved.
    pub parent: Option<&'a Book>,
}

/// Parameters of [`books`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BooksArgs<'a> {
    /// A regular expression that titles must match. Takes precedence over `parent`.
    pub title: Option<&'a str>,
    /// The author whose books are being resolved.
    pub parent: Option<&'a Author>,
}

/// Parameters of [`book`].
#[derive(Clone, Copy, Debug)]
pub struct BookArgs<'a> {
    /// The exact title.
    pub title: &'a str,
}

/// Parameters of [`create_author`].
#[derive(Clone, Debug)]
pub struct CreateAuthorArgs {
    /// The names of the new author.
    pub author: AuthorRecord,
}

/// All authors, in insertion order.
#[inline]
#[must_use]
pub fn authors(store: &Store) -> Vec<Author> {
    store.list_authors()
}

/// A single author, either at an explicit position or the author of the parent book.
///
/// Returns [`None`] if neither is given, or if the position does not name an author.
#[inline]
#[must_use]
pub fn author(store: &Store, args: AuthorArgs<'_>) -> Option<Author> {
    let id = match (args.index, args.parent) {
        (Some(index), _) => AuthorId::from_index(index),
        (None, Some(book)) => Some(book.author),
        (None, None) => None,
    };
    let Some(id) = id else {
        debug!(index = ?args.index, "no author position to resolve");
        return None;
    };

    store
        .author(id)
        .inspect_err(|err| debug!(index = id.index(), %err, "author lookup resolved to null"))
        .ok()
}

/// Books matching a title filter, written by the parent author, or all books, in that order of
/// precedence.
///
/// The title filter is interpreted as a regular expression, not escaped, and may match
/// anywhere in the title.
///
/// # Errors
///
/// Returns [`InvalidPattern`](ResolveError::InvalidPattern) if the title filter is not a valid
/// regular expression.
#[inline]
pub fn books(store: &Store, args: BooksArgs<'_>) -> Result<Vec<Book>, ResolveError> {
    if let Some(pattern) = args.title {
        let regex = Regex::new(pattern).inspect_err(|err| {
            warn!(pattern, %err, "rejected title filter");
        })?;
        return Ok(store.books_where(|book| regex.is_match(&book.title)));
    }

    Ok(match args.parent {
        Some(author) => store.books_where(|book| book.author == author.id),
        None => store.list_books(),
    })
}

/// The first book with exactly the given title.
#[inline]
#[must_use]
pub fn book(store: &Store, args: BookArgs<'_>) -> Option<Book> {
    store
        .book(args.title)
        .inspect_err(|_err| debug!(title = args.title, "book lookup resolved to null"))
        .ok()
}

/// Append a new author and return it.
#[inline]
pub fn create_author(store: &Store, args: CreateAuthorArgs) -> Author {
    let author = store.append_author(args.author);
    info!(id = author.id.index(), name = %author.name, "created author");
    author
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    reason = "Panics simply indicate failed tests."
)]
#[allow(clippy::unwrap_used, reason = "Panics simply indicate failed tests.")]
mod tests {
    use super::*;

    #[test]
    fn author_name_is_derived() {
        let store = Store::seeded();
        let records = [("J.K.", "Rowling"), ("Michael", "Crichton")];

        for (i, (first, last)) in records.into_iter().enumerate() {
            let index = i32::try_from(i).unwrap();
            let author = author(
                &store,
                AuthorArgs {
                    index: Some(index),
                    parent: None,
                },
            )
            .unwrap();
            assert_eq!(author.name, format!("{first} {last}"));
        }
    }

    #[test]
    fn authors_unfiltered() {
        let store = Store::seeded();
        assert_eq!(authors(&store), store.list_authors());
    }

    #[test]
    fn author_out_of_range_is_absent() {
        let store = Store::seeded();
        for index in [2, 99, -1, i32::MIN] {
            let args = AuthorArgs {
                index: Some(index),
                parent: None,
            };
            assert_eq!(author(&store, args), None);
        }
        assert_eq!(author(&store, AuthorArgs::default()), None);
    }

    #[test]
    fn author_from_parent_matches_index() {
        let store = Store::seeded();
        let parent = store.book("Jurassic Park").unwrap();

        let by_parent = author(
            &store,
            AuthorArgs {
                index: None,
                parent: Some(&parent),
            },
        );
        let by_index = author(
            &store,
            AuthorArgs {
                index: Some(1),
                parent: None,
            },
        );

        assert!(by_parent.is_some());
        assert_eq!(by_parent, by_index);
    }

    #[test]
    fn explicit_index_beats_parent() {
        let store = Store::seeded();
        let parent = store.book("Jurassic Park").unwrap();

        let found = author(
            &store,
            AuthorArgs {
                index: Some(0),
                parent: Some(&parent),
            },
        )
        .unwrap();
        assert_eq!(found.lastname, "Rowling");
    }

    #[test]
    fn dangling_parent_reference_is_absent() {
        let store = Store::new(
            vec![AuthorRecord::new("Only", "One")],
            vec![Book::new("Orphan", AuthorId::new(5), ["Only chapter"])],
        );
        let orphan = store.book("Orphan").unwrap();

        let args = AuthorArgs {
            index: None,
            parent: Some(&orphan),
        };
        assert_eq!(author(&store, args), None);
    }

    #[test]
    fn books_by_title_pattern() {
        let store = Store::seeded();

        let harry = books(
            &store,
            BooksArgs {
                title: Some("Harry"),
                parent: None,
            },
        )
        .unwrap();
        assert_eq!(harry.len(), 1);
        assert!(harry[0].title.contains("Harry"));

        // Patterns are regular expressions, not literal substrings.
        let either = books(
            &store,
            BooksArgs {
                title: Some("^(Jurassic|Harry) "),
                parent: None,
            },
        )
        .unwrap();
        assert_eq!(either.len(), 2);
    }

    #[test]
    fn books_unfiltered() {
        let store = Store::seeded();
        assert_eq!(
            books(&store, BooksArgs::default()).unwrap(),
            store.list_books()
        );
    }

    #[test]
    fn books_of_parent_author() {
        let store = Store::seeded();
        let rowling = store.author(AuthorId::new(0)).unwrap();

        let written = books(
            &store,
            BooksArgs {
                title: None,
                parent: Some(&rowling),
            },
        )
        .unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].author, AuthorId::new(0));
    }

    #[test]
    fn title_filter_beats_parent() {
        let store = Store::seeded();
        let rowling = store.author(AuthorId::new(0)).unwrap();

        let found = books(
            &store,
            BooksArgs {
                title: Some("Jurassic"),
                parent: Some(&rowling),
            },
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Jurassic Park");
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        let store = Store::seeded();
        let err = books(
            &store,
            BooksArgs {
                title: Some("(Harry"),
                parent: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPattern(_)));
        assert!(!err.is_absent());
    }

    #[test]
    fn book_exact_title() {
        let store = Store::seeded();
        let found = book(
            &store,
            BookArgs {
                title: "Jurassic Park",
            },
        )
        .unwrap();
        assert_eq!(found.chapters, ["Intro", "The Story", "Outro"]);

        assert_eq!(
            book(
                &store,
                BookArgs {
                    title: "nonexistent"
                }
            ),
            None
        );
    }

    #[test]
    fn created_author_is_listed() {
        let store = Store::seeded();
        let created = create_author(
            &store,
            CreateAuthorArgs {
                author: AuthorRecord::new("A", "B"),
            },
        );

        assert_eq!(created.name, "A B");
        assert_eq!(created.id, AuthorId::new(2));
        assert_eq!(authors(&store).last(), Some(&created));
    }
}
