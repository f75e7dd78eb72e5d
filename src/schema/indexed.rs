//! The schema over the indexed dataset, with relationship fields and a mutation.

use crate::{
    dataset::{Author, AuthorRecord, Book, Store},
    errors::ResolveError,
    resolvers::{self, AuthorArgs, BookArgs, BooksArgs, CreateAuthorArgs},
    schema::nullable_items,
};
use async_graphql::{Context, EmptySubscription, Error, InputObject, Object, Result, Schema};

/// The schema type.
pub type IndexedSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema, serving the given store.
#[inline]
#[must_use]
pub fn build(store: Store) -> IndexedSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(store)
        .finish()
}

/// Turn a resolver result into a nullable field value. Absent values become `null`; failures
/// become `null` too, with the error recorded against the field.
fn report<T>(ctx: &Context<'_>, result: Result<T, ResolveError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) if err.is_absent() => None,
        Err(err) => {
            let error = Error::new(err.to_string()).into_server_error(ctx.item.pos);
            ctx.add_error(ctx.set_error_path(error));
            None
        },
    }
}

/// The query root.
#[derive(Clone, Copy, Debug, Default)]
pub struct Query;

#[Object]
impl Query {
    /// Books whose title matches the regular expression `title`, or all books.
    async fn books(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
    ) -> Result<Option<Vec<Option<Book>>>> {
        let store = ctx.data::<Store>()?;
        let args = BooksArgs {
            title: title.as_deref(),
            parent: None,
        };
        Ok(report(ctx, resolvers::books(store, args)).map(nullable_items))
    }

    /// The book titled exactly `title`.
    async fn book(&self, ctx: &Context<'_>, title: String) -> Result<Option<Book>> {
        let store = ctx.data::<Store>()?;
        Ok(resolvers::book(store, BookArgs { title: &title }))
    }

    /// All authors.
    async fn authors(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Author>>>> {
        let store = ctx.data::<Store>()?;
        Ok(Some(nullable_items(resolvers::authors(store))))
    }

    /// The author at position `index`.
    async fn author(&self, ctx: &Context<'_>, index: i32) -> Result<Option<Author>> {
        let store = ctx.data::<Store>()?;
        let args = AuthorArgs {
            index: Some(index),
            parent: None,
        };
        Ok(resolvers::author(store, args))
    }
}

/// The mutation root.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mutation;

#[Object]
impl Mutation {
    /// Add an author. It is visible to every later query.
    async fn create_author(&self, ctx: &Context<'_>, author: AuthorInput) -> Result<Author> {
        let store = ctx.data::<Store>()?;
        let args = CreateAuthorArgs {
            author: author.into(),
        };
        Ok(resolvers::create_author(store, args))
    }
}

/// The names of an author to be created.
#[derive(Clone, Debug, InputObject)]
pub struct AuthorInput {
    /// The first name.
    pub firstname: String,
    /// The last name.
    pub lastname: String,
}

impl From<AuthorInput> for AuthorRecord {
    #[inline]
    fn from(value: AuthorInput) -> Self {
        Self {
            firstname: value.firstname,
            lastname: value.lastname,
        }
    }
}

#[Object]
impl Author {
    /// The position of the author, usable as `author(index:)`.
    async fn id(&self) -> Result<i32> {
        self.id
            .as_int()
            .ok_or_else(|| Error::new("Author id does not fit in an Int."))
    }

    /// The first name.
    async fn firstname(&self) -> &str {
        &self.firstname
    }

    /// The last name.
    async fn lastname(&self) -> &str {
        &self.lastname
    }

    /// The full name.
    async fn name(&self) -> &str {
        &self.name
    }

    /// The books written by this author.
    async fn books(&self, ctx: &Context<'_>) -> Result<Option<Vec<Book>>> {
        let store = ctx.data::<Store>()?;
        let args = BooksArgs {
            title: None,
            parent: Some(self),
        };
        Ok(report(ctx, resolvers::books(store, args)))
    }
}

#[Object]
impl Book {
    /// The title.
    async fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    /// The author, or `null` if the book refers to an author that does not exist.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        let store = ctx.data::<Store>()?;
        let args = AuthorArgs {
            index: None,
            parent: Some(self),
        };
        Ok(resolvers::author(store, args))
    }

    /// The chapter names, in order.
    async fn chapters(&self) -> &[String] {
        &self.chapters
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
    use crate::dataset::AuthorId;
    use async_graphql::Response;
    use serde_json::{Value, json};

    async fn run(schema: &IndexedSchema, document: &str) -> Response {
        schema.execute(document).await
    }

    fn data(response: Response) -> Value {
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn book_with_chapters() {
        let schema = build(Store::seeded());
        let response = run(
            &schema,
            r#"{ book(title: "Jurassic Park") { title chapters } missing: book(title: "nonexistent") { title } }"#,
        )
        .await;

        assert_eq!(
            data(response),
            json!({
                "book": { "title": "Jurassic Park", "chapters": ["Intro", "The Story", "Outro"] },
                "missing": null,
            })
        );
    }

    #[tokio::test]
    async fn books_filtered_by_title() {
        let schema = build(Store::seeded());
        let response = run(&schema, r#"{ books(title: "Harry") { title } }"#).await;

        assert_eq!(
            data(response),
            json!({ "books": [{ "title": "Harry Potter and the Chamber of Secrets" }] })
        );
    }

    #[tokio::test]
    async fn nested_relationships() {
        let schema = build(Store::seeded());
        let response = run(
            &schema,
            "{ authors { id name books { title author { id } } } }",
        )
        .await;

        assert_eq!(
            data(response),
            json!({
                "authors": [
                    {
                        "id": 0,
                        "name": "J.K. Rowling",
                        "books": [{ "title": "Harry Potter and the Chamber of Secrets", "author": { "id": 0 } }],
                    },
                    {
                        "id": 1,
                        "name": "Michael Crichton",
                        "books": [{ "title": "Jurassic Park", "author": { "id": 1 } }],
                    },
                ]
            })
        );
    }

    #[tokio::test]
    async fn author_by_index_or_null() {
        let schema = build(Store::seeded());
        let response = run(
            &schema,
            "{ author(index: 1) { firstname lastname name } past: author(index: 99) { name } negative: author(index: -1) { name } }",
        )
        .await;

        assert_eq!(
            data(response),
            json!({
                "author": { "firstname": "Michael", "lastname": "Crichton", "name": "Michael Crichton" },
                "past": null,
                "negative": null,
            })
        );
    }

    #[tokio::test]
    async fn dangling_author_is_null() {
        let store = Store::new(
            Vec::new(),
            vec![Book::new("Orphan", AuthorId::new(3), ["One"])],
        );
        let schema = build(store);
        let response = run(&schema, "{ books { title author { name } chapters } }").await;

        assert_eq!(
            data(response),
            json!({ "books": [{ "title": "Orphan", "author": null, "chapters": ["One"] }] })
        );
    }

    #[tokio::test]
    async fn invalid_pattern_fails_only_its_field() {
        let schema = build(Store::seeded());
        let response = run(&schema, r#"{ books(title: "(") { title } authors { name } }"#).await;

        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("Invalid title filter"));
        assert_eq!(
            serde_json::to_value(&response.errors[0].path).unwrap(),
            json!(["books"])
        );
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({
                "books": null,
                "authors": [{ "name": "J.K. Rowling" }, { "name": "Michael Crichton" }],
            })
        );
    }

    #[tokio::test]
    async fn created_author_is_queryable() {
        let schema = build(Store::seeded());
        let response = run(
            &schema,
            r#"mutation { createAuthor(author: { firstname: "A", lastname: "B" }) { id name books { title } } }"#,
        )
        .await;
        assert_eq!(
            data(response),
            json!({ "createAuthor": { "id": 2, "name": "A B", "books": [] } })
        );

        let response = run(&schema, "{ authors { id name } }").await;
        assert_eq!(
            data(response),
            json!({
                "authors": [
                    { "id": 0, "name": "J.K. Rowling" },
                    { "id": 1, "name": "Michael Crichton" },
                    { "id": 2, "name": "A B" },
                ]
            })
        );
    }

    #[test]
    fn sdl_lists_operations() {
        let sdl = build(Store::seeded()).sdl();

        for field in [
            "books(title: String): [Book]",
            "authors: [Author]",
            "title: String\n",
            "book(title: String!)",
            "author(index: Int!)",
            "createAuthor(author: AuthorInput!)",
            "chapters: [String!]!",
        ] {
            assert!(sdl.contains(field), "missing `{field}` in\n{sdl}");
        }
    }
}
