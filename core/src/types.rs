//! Public entities and upstream wire DTOs.
//!
//! # Design
//! `Creature` and `Ability` are the shapes handed to callers. The
//! `*Document` types mirror the upstream JSON only as far as this crate reads
//! it; serde ignores every other upstream field, so nothing beyond the public
//! shape can leak through. `Creature::try_from(CreatureDocument)` is the one
//! projection every operation goes through.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One upstream creature record, fully resolved from a detail document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::SimpleObject),
    graphql(name = "Pokemon")
)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub abilities: Vec<Ability>,
}

/// A named trait attached to a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Ability {
    pub name: String,
}

/// Default page size for `list_creatures`.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page a caller may request in one listing.
pub const MAX_PAGE_LIMIT: u32 = 2000;

/// Window into the upstream creature listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Validate caller-supplied bounds. Negative values and limits above
    /// `MAX_PAGE_LIMIT` are rejected rather than forwarded upstream.
    pub fn new(limit: i64, offset: i64) -> Result<Self, ApiError> {
        if limit < 0 {
            return Err(ApiError::InvalidArgument(format!(
                "limit must not be negative, got {limit}"
            )));
        }
        if limit > i64::from(MAX_PAGE_LIMIT) {
            return Err(ApiError::InvalidArgument(format!(
                "limit must be at most {MAX_PAGE_LIMIT}, got {limit}"
            )));
        }
        if offset < 0 {
            return Err(ApiError::InvalidArgument(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        let offset = u32::try_from(offset)
            .map_err(|_| ApiError::InvalidArgument(format!("offset {offset} is out of range")))?;
        Ok(Self {
            limit: limit as u32,
            offset,
        })
    }
}

/// `{name, url}` pair the upstream uses to point at another resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Body of `GET /pokemon/{nameOrId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatureDocument {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub abilities: Vec<AbilitySlot>,
}

/// One entry of a creature document's `abilities` array.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: AbilityRef,
}

/// Only the name of an ability is read; its `url` is never followed.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityRef {
    pub name: String,
}

/// Body of `GET /pokemon?limit=..&offset=..`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreaturePage {
    pub results: Vec<NamedResource>,
}

/// Body of `GET /type/{type}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDocument {
    pub pokemon: Vec<CategoryMember>,
}

/// One entry of a category document's `pokemon` array.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMember {
    pub pokemon: NamedResource,
}

impl TryFrom<CreatureDocument> for Creature {
    type Error = ApiError;

    fn try_from(doc: CreatureDocument) -> Result<Self, Self::Error> {
        if doc.id == 0 {
            return Err(ApiError::UpstreamMalformed(format!(
                "creature '{}' has id 0",
                doc.name
            )));
        }
        if doc.name.is_empty() {
            return Err(ApiError::UpstreamMalformed(format!(
                "creature {} has an empty name",
                doc.id
            )));
        }
        let abilities = doc
            .abilities
            .into_iter()
            .map(|slot| Ability {
                name: slot.ability.name,
            })
            .collect();
        Ok(Self {
            id: doc.id,
            name: doc.name,
            height: doc.height,
            weight: doc.weight,
            abilities,
        })
    }
}
