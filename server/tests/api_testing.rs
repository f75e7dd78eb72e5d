//! End-to-end tests of the GraphQL endpoint over HTTP.

// Silence unused-crate-dependencies lint for the test crate.
use async_graphql as _;
use async_graphql_axum as _;
use clap as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    reason = "Panics simply indicate failed tests."
)]
mod tests {
    use bookshelf::{AuthorRecord, Store};
    use bookshelf_server::{
        Variant,
        app_builder::{ENDPOINT, build_indexed_app},
        build_app,
    };
    use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// # Panics
    /// Panics if the TCP listener cannot bind to the requested address
    /// or if the local address cannot be retrieved.
    async fn spawn(app: axum::Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let addrs = listener
            .local_addr()
            .expect("Failed to get local address from listener");
        drop(tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server failed to start");
        }));

        addrs
    }

    /// # Panics
    /// Panics if the request fails or the response isn't JSON.
    async fn post(client: &Client, addrs: SocketAddr, query: &str) -> Value {
        let response = client
            .post(format!("http://{addrs}{ENDPOINT}"))
            .json(&json!({ "query": query }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);

        response
            .json()
            .await
            .expect("Failed to parse the response")
    }

    #[tokio::test]
    async fn indexed_queries() {
        let addrs = spawn(build_app(Variant::Indexed)).await;
        let client = Client::new();

        let body = post(
            &client,
            addrs,
            r#"{ book(title: "Jurassic Park") { chapters author { name } } books(title: "Harry") { title } }"#,
        )
        .await;
        assert_eq!(
            body,
            json!({
                "data": {
                    "book": {
                        "chapters": ["Intro", "The Story", "Outro"],
                        "author": { "name": "Michael Crichton" },
                    },
                    "books": [{ "title": "Harry Potter and the Chamber of Secrets" }],
                }
            })
        );

        let body = post(&client, addrs, "{ author(index: 0) { books { title } } }").await;
        assert_eq!(
            body["data"]["author"]["books"],
            json!([{ "title": "Harry Potter and the Chamber of Secrets" }])
        );
    }

    #[tokio::test]
    async fn created_author_survives_requests() {
        let store = Store::seeded();
        let addrs = spawn(build_indexed_app(store.clone())).await;
        let client = Client::new();

        let body = post(
            &client,
            addrs,
            r#"mutation { createAuthor(author: { firstname: "A", lastname: "B" }) { id name } }"#,
        )
        .await;
        assert_eq!(
            body["data"]["createAuthor"],
            json!({ "id": 2, "name": "A B" })
        );

        let body = post(&client, addrs, "{ authors { name } }").await;
        assert_eq!(
            body["data"]["authors"],
            json!([
                { "name": "J.K. Rowling" },
                { "name": "Michael Crichton" },
                { "name": "A B" },
            ])
        );

        // The server shares the store handed to it.
        assert_eq!(
            store.list_authors().last().map(|author| author.name.as_str()),
            Some("A B")
        );
        drop(store.append_author(AuthorRecord::new("C", "D")));
        let body = post(&client, addrs, "{ author(index: 3) { name } }").await;
        assert_eq!(body["data"]["author"], json!({ "name": "C D" }));
    }

    #[tokio::test]
    async fn invalid_pattern_is_a_field_error() {
        let addrs = spawn(build_app(Variant::Indexed)).await;
        let client = Client::new();

        let body = post(&client, addrs, r#"{ books(title: "[") { title } authors { id } }"#).await;
        assert_eq!(body["data"].get("books"), Some(&Value::Null));
        assert_eq!(body["data"]["authors"], json!([{ "id": 0 }, { "id": 1 }]));
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["errors"][0]["path"], json!(["books"]));
    }

    #[tokio::test]
    async fn embedded_queries() {
        let addrs = spawn(build_app(Variant::Embedded)).await;
        let client = Client::new();

        let body = post(&client, addrs, "{ books { title author { name } } }").await;
        assert_eq!(
            body["data"]["books"],
            json!([
                {
                    "title": "Harry Potter and the Chamber of Secrets",
                    "author": { "name": "J.K. Rowling" },
                },
                { "title": "Jurassic Park", "author": { "name": "Michael Crichton" } },
            ])
        );

        // Relationship fields only exist on the indexed variant.
        let body = post(&client, addrs, "{ authors { name books { title } } }").await;
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn graphiql_page() {
        let addrs = spawn(build_app(Variant::Indexed)).await;

        let response = Client::new()
            .get(format!("http://{addrs}{ENDPOINT}"))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert!(content_type.is_some_and(|value| value.starts_with("text/html")));
    }
}
