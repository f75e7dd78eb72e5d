//! The in-memory dataset of authors and books.
//!
//! Books refer to their author by position in the author collection (see [`AuthorId`]). The
//! author collection is append-only, so an id handed out once stays valid for the lifetime of
//! the [`Store`]. Books are fixed when the store is created.

use crate::errors::ResolveError;
use parking_lot::RwLock;
use std::sync::Arc;

pub mod embedded;

/// The position of an author in the author collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorId(usize);

impl AuthorId {
    /// Create an id from a raw position.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Create an id from a GraphQL `Int` argument. Negative values never name an author and
    /// produce [`None`].
    #[inline]
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().map(Self)
    }

    /// The raw position.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// The id as a GraphQL `Int`, if it fits.
    #[inline]
    #[must_use]
    pub fn as_int(self) -> Option<i32> {
        i32::try_from(self.0).ok()
    }
}

/// An author as stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorRecord {
    /// The first name.
    pub firstname: String,
    /// The last name.
    pub lastname: String,
}

impl AuthorRecord {
    /// Convenience constructor.
    #[inline]
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// An author as seen by readers, with the derived fields filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    /// The position of the author in the collection.
    pub id: AuthorId,
    /// The first name.
    pub firstname: String,
    /// The last name.
    pub lastname: String,
    /// The first and last names separated by a single space.
    pub name: String,
}

impl Author {
    /// Derive the view of a record stored at `id`.
    fn from_record(id: AuthorId, record: &AuthorRecord) -> Self {
        Self {
            id,
            firstname: record.firstname.clone(),
            lastname: record.lastname.clone(),
            name: format!("{} {}", record.firstname, record.lastname),
        }
    }
}

/// A book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    /// The title. Titles are unique within a store.
    pub title: String,
    /// The author. Nothing guarantees that this refers to an existing author.
    pub author: AuthorId,
    /// The chapter names, in order.
    pub chapters: Vec<String>,
}

impl Book {
    /// Convenience constructor.
    #[inline]
    pub fn new<C>(title: impl Into<String>, author: AuthorId, chapters: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            title: title.into(),
            author,
            chapters: chapters.into_iter().map(Into::into).collect(),
        }
    }
}

/// Shared handle to the dataset. Clones refer to the same data.
#[derive(Clone, Debug)]
pub struct Store {
    /// Authors, only ever appended to.
    authors: Arc<RwLock<Vec<AuthorRecord>>>,
    /// Books, never modified.
    books: Arc<[Book]>,
}

impl Store {
    /// Create a store from the given records.
    #[inline]
    #[must_use]
    pub fn new(authors: Vec<AuthorRecord>, books: Vec<Book>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(authors)),
            books: books.into(),
        }
    }

    /// Create a store populated with the seed dataset.
    #[inline]
    #[must_use]
    pub fn seeded() -> Self {
        let authors = vec![
            AuthorRecord::new("J.K.", "Rowling"),
            AuthorRecord::new("Michael", "Crichton"),
        ];
        let books = vec![
            Book::new(
                "Harry Potter and the Chamber of Secrets",
                AuthorId::new(0),
                ["Chapter 1", "Chapter 2", "Chapter 3"],
            ),
            Book::new(
                "Jurassic Park",
                AuthorId::new(1),
                ["Intro", "The Story", "Outro"],
            ),
        ];
        Self::new(authors, books)
    }

    /// All authors in insertion order.
    #[inline]
    #[must_use]
    pub fn list_authors(&self) -> Vec<Author> {
        self.authors
            .read()
            .iter()
            .enumerate()
            .map(|(i, record)| Author::from_record(AuthorId(i), record))
            .collect()
    }

    /// Copies of all books in insertion order.
    #[inline]
    #[must_use]
    pub fn list_books(&self) -> Vec<Book> {
        self.books.to_vec()
    }

    /// The author at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`](ResolveError::OutOfRange) if there is no author at that position.
    #[inline]
    pub fn author(&self, id: AuthorId) -> Result<Author, ResolveError> {
        let authors = self.authors.read();
        authors
            .get(id.0)
            .map(|record| Author::from_record(id, record))
            .ok_or(ResolveError::OutOfRange {
                index: id.0,
                len: authors.len(),
            })
    }

    /// The first book titled exactly `title`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](ResolveError::NotFound) if no book has that title.
    #[inline]
    pub fn book(&self, title: &str) -> Result<Book, ResolveError> {
        self.books
            .iter()
            .find(|book| book.title == title)
            .cloned()
            .ok_or(ResolveError::NotFound)
    }

    /// Copies of the books satisfying `predicate`, in insertion order.
    #[inline]
    pub fn books_where<P>(&self, mut predicate: P) -> Vec<Book>
    where
        P: FnMut(&Book) -> bool,
    {
        self.books
            .iter()
            .filter(|&book| predicate(book))
            .cloned()
            .collect()
    }

    /// Append an author and return it with the id it was given.
    // NOTE: The id is taken under the same write guard as the push, so concurrent appends never
    // observe the same length.
    #[inline]
    pub fn append_author(&self, record: AuthorRecord) -> Author {
        let mut authors = self.authors.write();
        let id = AuthorId(authors.len());
        let author = Author::from_record(id, &record);
        authors.push(record);
        author
    }
}

impl Default for Store {
    #[inline]
    fn default() -> Self {
        Self::seeded()
    }
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
    fn authors_have_positional_ids() {
        let store = Store::seeded();
        let authors = store.list_authors();

        assert_eq!(authors.len(), 2);
        for (i, author) in authors.iter().enumerate() {
            assert_eq!(author.id, AuthorId::new(i));
        }
        assert_eq!(authors[0].name, "J.K. Rowling");
        assert_eq!(authors[1].name, "Michael Crichton");
    }

    #[test]
    fn listing_is_repeatable() {
        let store = Store::seeded();
        assert_eq!(store.list_authors(), store.list_authors());
        assert_eq!(store.list_books(), store.list_books());
    }

    #[test]
    fn listed_books_are_copies() {
        let store = Store::seeded();
        let mut books = store.list_books();
        books[0].title.clear();
        books[0].chapters.clear();

        let again = store.list_books();
        assert_eq!(again[0].title, "Harry Potter and the Chamber of Secrets");
        assert_eq!(again[0].chapters.len(), 3);
    }

    #[test]
    fn author_out_of_range() {
        let store = Store::seeded();
        let err = store.author(AuthorId::new(2)).unwrap_err();
        assert!(matches!(err, ResolveError::OutOfRange { index: 2, len: 2 }));
        assert!(err.is_absent());
    }

    #[test]
    fn book_by_exact_title() {
        let store = Store::seeded();
        assert_eq!(
            store.book("Jurassic Park").unwrap().chapters,
            ["Intro", "The Story", "Outro"]
        );
        assert!(matches!(
            store.book("Jurassic").unwrap_err(),
            ResolveError::NotFound
        ));
    }

    #[test]
    fn append_is_visible_to_clones() {
        let store = Store::seeded();
        let handle = store.clone();

        let author = handle.append_author(AuthorRecord::new("Terry", "Pratchett"));
        assert_eq!(author.id, AuthorId::new(2));
        assert_eq!(author.name, "Terry Pratchett");

        let authors = store.list_authors();
        assert_eq!(authors.len(), 3);
        assert_eq!(authors[2], author);
    }

    #[test]
    fn concurrent_appends_get_distinct_ids() {
        let store = Store::new(Vec::new(), Vec::new());

        let handles = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .append_author(AuthorRecord::new(format!("First{i}"), "Last"))
                        .id
                })
            })
            .collect::<Vec<_>>();
        let mut ids = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().index())
            .collect::<Vec<_>>();
        ids.sort_unstable();

        assert_eq!(ids, (0..8).collect::<Vec<_>>());
        assert_eq!(store.list_authors().len(), 8);
    }

    #[test]
    fn int_conversions() {
        assert_eq!(AuthorId::from_index(1), Some(AuthorId::new(1)));
        assert_eq!(AuthorId::from_index(-1), None);
        assert_eq!(AuthorId::new(7).as_int(), Some(7));
        assert_eq!(AuthorId::new(usize::MAX).as_int(), None);
    }
}
