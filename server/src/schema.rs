//! GraphQL schema for the façade.
//!
//! Field and argument names follow the public API clients already use
//! (`getPokemon`, `listPokemon`, `getPokemonByType`). Every `ApiError`
//! surfaces as a GraphQL error carrying its message and an
//! `extensions.code` taken from `ErrorKind::code`.

use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema};
use pokegraph_core::{Aggregator, ApiError, Creature, Page, Transport, DEFAULT_PAGE_LIMIT};
use tracing::warn;

/// The aggregator as stored in schema data.
pub type UpstreamAggregator = Aggregator<Arc<dyn Transport>>;

pub type PokeSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Look up one Pokémon by name or numeric id.
    async fn get_pokemon(&self, ctx: &Context<'_>, name_or_id: String) -> async_graphql::Result<Creature> {
        let aggregator = ctx.data::<UpstreamAggregator>()?;
        aggregator
            .get_creature(&name_or_id)
            .await
            .map_err(to_graphql_error)
    }

    /// One page of the Pokémon listing. Defaults to the first ten; an
    /// explicit `null` also falls back to the default.
    async fn list_pokemon(
        &self,
        ctx: &Context<'_>,
        #[graphql(default_with = "Some(10)")] limit: Option<i32>,
        #[graphql(default_with = "Some(0)")] offset: Option<i32>,
    ) -> async_graphql::Result<Vec<Creature>> {
        let aggregator = ctx.data::<UpstreamAggregator>()?;
        let page = Page::new(
            limit.map_or(i64::from(DEFAULT_PAGE_LIMIT), i64::from),
            offset.map_or(0, i64::from),
        )
        .map_err(to_graphql_error)?;
        aggregator.list_creatures(page).await.map_err(to_graphql_error)
    }

    /// Every Pokémon of the given type.
    async fn get_pokemon_by_type(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "type")] category: String,
    ) -> async_graphql::Result<Vec<Creature>> {
        let aggregator = ctx.data::<UpstreamAggregator>()?;
        aggregator
            .get_creatures_by_category(&category)
            .await
            .map_err(to_graphql_error)
    }
}

pub fn build_schema(aggregator: UpstreamAggregator, max_depth: usize) -> PokeSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(aggregator)
        .limit_depth(max_depth)
        .finish()
}

fn to_graphql_error(err: ApiError) -> async_graphql::Error {
    let code = err.kind().code();
    warn!(code, error = %err, "query failed");
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}
