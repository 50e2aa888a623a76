//! Resource aggregation: turn one query into upstream calls and compose the
//! answers into `Creature` values.
//!
//! # Design
//! Every operation is a stateless request/response cycle. Listings run in two
//! phases: one primary fetch yields an ordered list of references, then every
//! reference is resolved through a detail fetch. Detail fetches are dispatched
//! together and collected by position, so the result order is the reference
//! order no matter which fetch finishes first. The first failing fetch fails
//! the whole operation; the still-running siblings are dropped with it.

use std::num::NonZeroUsize;

use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, instrument};

use crate::client::PokeApiClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Creature, NamedResource, Page};

/// How many detail fetches a listing may have in flight at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOut {
    /// `None` dispatches every detail fetch at once.
    pub max_in_flight: Option<NonZeroUsize>,
}

impl FanOut {
    pub const fn unbounded() -> Self {
        Self { max_in_flight: None }
    }

    pub const fn bounded(max_in_flight: NonZeroUsize) -> Self {
        Self {
            max_in_flight: Some(max_in_flight),
        }
    }
}

/// Answers creature queries by composing upstream calls made through `T`.
#[derive(Debug, Clone)]
pub struct Aggregator<T> {
    transport: T,
    client: PokeApiClient,
    fan_out: FanOut,
}

impl<T: Transport> Aggregator<T> {
    pub fn new(transport: T, client: PokeApiClient) -> Self {
        Self {
            transport,
            client,
            fan_out: FanOut::default(),
        }
    }

    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Look up a single creature by name or numeric id.
    #[instrument(skip(self), err(level = "debug"))]
    pub async fn get_creature(&self, identifier: &str) -> Result<Creature, ApiError> {
        let request = self.client.build_get_creature(identifier)?;
        debug!(url = %request.url, "fetching creature");
        let response = self.transport.execute(request).await?;
        self.client.parse_creature(identifier, response)
    }

    /// Fetch one page of the creature listing, fully resolved.
    #[instrument(skip(self), err(level = "debug"))]
    pub async fn list_creatures(&self, page: Page) -> Result<Vec<Creature>, ApiError> {
        let request = self.client.build_list_creatures(page);
        debug!(url = %request.url, "fetching creature page");
        let response = self.transport.execute(request).await?;
        let references = self.client.parse_creature_page(response)?;
        self.resolve_all(references).await
    }

    /// Fetch every creature belonging to `category`, fully resolved.
    #[instrument(skip(self), err(level = "debug"))]
    pub async fn get_creatures_by_category(&self, category: &str) -> Result<Vec<Creature>, ApiError> {
        let request = self.client.build_get_category(category)?;
        debug!(url = %request.url, "fetching category");
        let response = self.transport.execute(request).await?;
        let references = self.client.parse_category(category, response)?;
        self.resolve_all(references).await
    }

    async fn resolve_all(&self, references: Vec<NamedResource>) -> Result<Vec<Creature>, ApiError> {
        debug!(count = references.len(), fan_out = ?self.fan_out.max_in_flight, "resolving references");
        let fetches: Vec<_> = references.iter().map(|reference| self.resolve(reference)).collect();
        match self.fan_out.max_in_flight {
            None => future::try_join_all(fetches).await,
            Some(limit) => stream::iter(fetches).buffered(limit.get()).try_collect().await,
        }
    }

    async fn resolve(&self, reference: &NamedResource) -> Result<Creature, ApiError> {
        let request = self.client.build_get_detail(reference);
        debug!(name = %reference.name, url = %request.url, "fetching detail");
        let response = self.transport.execute(request).await?;
        self.client.parse_detail(response)
    }
}
