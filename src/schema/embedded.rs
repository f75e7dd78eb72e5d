//! The schema over the embedded dataset. Read-only, with two root fields.

use crate::{
    dataset::embedded::{EmbeddedAuthor, EmbeddedBook, EmbeddedCatalog},
    schema::nullable_items,
};
use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Result, Schema};

/// The schema type.
pub type EmbeddedSchema = Schema<EmbeddedQuery, EmptyMutation, EmptySubscription>;

/// Build the schema, serving the given catalog.
#[inline]
#[must_use]
pub fn build(catalog: EmbeddedCatalog) -> EmbeddedSchema {
    Schema::build(EmbeddedQuery, EmptyMutation, EmptySubscription)
        .data(catalog)
        .finish()
}

/// The query root.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedQuery;

#[Object(name = "Query")]
impl EmbeddedQuery {
    /// All books.
    async fn books(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<EmbeddedBook>>>> {
        Ok(Some(nullable_items(ctx.data::<EmbeddedCatalog>()?.books())))
    }

    /// All authors.
    async fn authors(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<EmbeddedAuthor>>>> {
        Ok(Some(nullable_items(ctx.data::<EmbeddedCatalog>()?.authors())))
    }
}

#[Object(name = "Author")]
impl EmbeddedAuthor {
    /// The display name.
    async fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[Object(name = "Book")]
impl EmbeddedBook {
    /// The title.
    async fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    /// The author.
    async fn author(&self) -> Option<&EmbeddedAuthor> {
        Some(&self.author)
    }

    /// The chapter names, in order. The list itself is never `null`.
    async fn chapters(&self) -> Vec<Option<&str>> {
        self.chapters.iter().map(|chapter| Some(chapter.as_str())).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Panics simply indicate failed tests.")]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn books_with_embedded_authors() {
        let schema = build(EmbeddedCatalog::seeded());
        let response = schema
            .execute("{ books { title author { name } chapters } authors { name } }")
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({
                "books": [
                    {
                        "title": "Harry Potter and the Chamber of Secrets",
                        "author": { "name": "J.K. Rowling" },
                        "chapters": ["Chapter 1", "Chapter 2", "Chapter 3"],
                    },
                    {
                        "title": "Jurassic Park",
                        "author": { "name": "Michael Crichton" },
                        "chapters": ["Intro", "The Story", "Outro"],
                    },
                ],
                "authors": [{ "name": "J.K. Rowling" }, { "name": "Michael Crichton" }],
            })
        );
    }

    #[test]
    fn sdl_keeps_fields_nullable() {
        let sdl = build(EmbeddedCatalog::seeded()).sdl();

        for field in [
            "books: [Book]\n",
            "authors: [Author]\n",
            "title: String\n",
            "author: Author\n",
            "name: String\n",
            "chapters: [String]!",
        ] {
            assert!(sdl.contains(field), "missing `{field}` in\n{sdl}");
        }
        for field in ["title: String!", "name: String!", "author: Author!", "[Book!]"] {
            assert!(!sdl.contains(field), "unexpected `{field}` in\n{sdl}");
        }
    }

    #[tokio::test]
    async fn no_mutations() {
        let schema = build(EmbeddedCatalog::seeded());
        let response = schema
            .execute(r#"mutation { createAuthor(author: { firstname: "A", lastname: "B" }) { name } }"#)
            .await;
        assert!(!response.errors.is_empty());
    }
}
