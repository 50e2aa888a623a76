//! Resource aggregation core for the creature GraphQL façade.
//!
//! # Overview
//! Translates the three query operations (single lookup, paginated listing,
//! listing by type) into upstream REST calls and reshapes the JSON answers
//! into `Creature` values.
//!
//! # Design
//! - `PokeApiClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `Transport` is the only I/O seam. The server crate plugs in an HTTP
//!   client; tests plug in an in-memory fake.
//! - `Aggregator` owns the fan-out: primary fetch, concurrent detail fetches,
//!   ordered all-or-nothing assembly.
//! - Upstream DTOs are defined independently from the mock upstream crate;
//!   integration tests catch schema drift.
//! - With the `graphql` feature, `Creature` and `Ability` derive their
//!   GraphQL object types.

pub mod aggregator;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use aggregator::{Aggregator, FanOut};
pub use client::{PokeApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{Ability, Creature, NamedResource, Page, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
