//! The denormalized dataset, where each book carries a copy of its author.

/// An author. Only the display name is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedAuthor {
    /// The display name.
    pub name: String,
}

/// A book with its author embedded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedBook {
    /// The title.
    pub title: String,
    /// The author.
    pub author: EmbeddedAuthor,
    /// The chapter names, in order.
    pub chapters: Vec<String>,
}

/// A read-only collection of authors and books.
#[derive(Clone, Debug, Default)]
pub struct EmbeddedCatalog {
    /// All authors.
    authors: Vec<EmbeddedAuthor>,
    /// All books.
    books: Vec<EmbeddedBook>,
}

impl EmbeddedCatalog {
    /// Create a catalog from the given records.
    #[inline]
    #[must_use]
    pub const fn new(authors: Vec<EmbeddedAuthor>, books: Vec<EmbeddedBook>) -> Self {
        Self { authors, books }
    }

    /// Create a catalog populated with the seed dataset.
    #[inline]
    #[must_use]
    pub fn seeded() -> Self {
        let rowling = EmbeddedAuthor {
            name: "J.K. Rowling".to_owned(),
        };
        let crichton = EmbeddedAuthor {
            name: "Michael Crichton".to_owned(),
        };
        let books = vec![
            EmbeddedBook {
                title: "Harry Potter and the Chamber of Secrets".to_owned(),
                author: rowling.clone(),
                chapters: chapters(["Chapter 1", "Chapter 2", "Chapter 3"]),
            },
            EmbeddedBook {
                title: "Jurassic Park".to_owned(),
                author: crichton.clone(),
                chapters: chapters(["Intro", "The Story", "Outro"]),
            },
        ];
        Self::new(vec![rowling, crichton], books)
    }

    /// Copies of all authors.
    #[inline]
    #[must_use]
    pub fn authors(&self) -> Vec<EmbeddedAuthor> {
        self.authors.clone()
    }

    /// Copies of all books.
    #[inline]
    #[must_use]
    pub fn books(&self) -> Vec<EmbeddedBook> {
        self.books.clone()
    }
}

/// Collect chapter names.
fn chapters<const N: usize>(names: [&str; N]) -> Vec<String> {
    names.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn books_embed_their_author() {
        let catalog = EmbeddedCatalog::seeded();
        let books = catalog.books();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].author.name, "J.K. Rowling");
        assert_eq!(books[1].author, catalog.authors()[1]);
        assert_eq!(books[1].chapters, ["Intro", "The Story", "Outro"]);
    }
}
