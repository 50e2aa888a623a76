//! GraphQL façade over the upstream creature REST API.
//!
//! # Overview
//! The composition root: builds the reqwest transport, wraps it in the core
//! `Aggregator`, exposes it through an `async-graphql` schema and serves that
//! schema over axum.
//!
//! # Routes
//! - `POST /` and `POST /graphql` execute GraphQL requests.
//! - `GET /` and `GET /graphql` serve GraphiQL.
//! - `GET /health` answers `ok`.

pub mod config;
pub mod schema;
pub mod upstream;

use std::future::Future;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use pokegraph_core::{Aggregator, PokeApiClient, Transport};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use schema::{build_schema, PokeSchema, QueryRoot, UpstreamAggregator};
pub use upstream::ReqwestTransport;

pub fn app(schema: PokeSchema) -> Router {
    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(schema)
}

/// Wire the production stack described by `config`.
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config.upstream_timeout())?);
    let aggregator = Aggregator::new(transport, PokeApiClient::new(&config.upstream_url))
        .with_fan_out(config.fan_out());
    Ok(app(build_schema(aggregator, config.max_query_depth)))
}

pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

async fn graphql_handler(State(schema): State<PokeSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health() -> &'static str {
    "ok"
}
