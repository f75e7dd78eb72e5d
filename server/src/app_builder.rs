//! Construction of the HTTP application.

use crate::config::Variant;
use async_graphql::{ObjectType, Schema, SubscriptionType, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use bookshelf::{
    Store,
    dataset::embedded::EmbeddedCatalog,
    schema::{embedded, indexed},
};

/// The path both the GraphQL endpoint and the GraphiQL page are served on.
pub const ENDPOINT: &str = "/graphql";

/// Build the router for a variant, with a freshly seeded dataset.
#[inline]
#[must_use]
pub fn build_app(variant: Variant) -> Router {
    match variant {
        Variant::Embedded => route(embedded::build(EmbeddedCatalog::seeded())),
        Variant::Indexed => build_indexed_app(Store::seeded()),
    }
}

/// Build the router for the indexed variant, serving an existing store.
#[inline]
#[must_use]
pub fn build_indexed_app(store: Store) -> Router {
    route(indexed::build(store))
}

/// Route GraphQL requests to `schema`.
fn route<Q, M, S>(schema: Schema<Q, M, S>) -> Router
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    Router::new()
        .route(ENDPOINT, get(graphiql).post(handler::<Q, M, S>))
        .with_state(schema)
}

/// Execute a GraphQL request against whichever schema the router was built with.
async fn handler<Q, M, S>(
    State(schema): State<Schema<Q, M, S>>,
    graphql_request: GraphQLRequest,
) -> GraphQLResponse
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    schema.execute(graphql_request.into_inner()).await.into()
}

/// An interactive query page.
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(ENDPOINT).finish())
}
