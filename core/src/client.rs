//! Stateless HTTP request builder and response parser for the upstream API.
//!
//! # Design
//! `PokeApiClient` holds only a `base_url` and carries no mutable state
//! between calls. Each upstream call is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The `Aggregator` pairs them with a `Transport`, keeping
//! this module deterministic and free of I/O.
//!
//! Status handling depends on what was asked for. A non-2xx answer to a
//! creature or category lookup means the caller named something that does
//! not exist (`NotFound`); a non-2xx answer to a listing or a detail
//! reference is an upstream fault (`UpstreamStatus`).

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{
    CategoryDocument, Creature, CreatureDocument, CreaturePage, NamedResource, Page,
};

/// Public base URL of the upstream REST API.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Synchronous, stateless client for the upstream creature API.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `identifier` is a name or numeric id; the upstream accepts either.
    pub fn build_get_creature(&self, identifier: &str) -> Result<HttpRequest, ApiError> {
        let identifier = path_segment("nameOrId", identifier)?;
        Ok(HttpRequest::get(format!(
            "{}/pokemon/{identifier}",
            self.base_url
        )))
    }

    pub fn build_list_creatures(&self, page: Page) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/pokemon?limit={}&offset={}",
            self.base_url, page.limit, page.offset
        ))
    }

    pub fn build_get_category(&self, category: &str) -> Result<HttpRequest, ApiError> {
        let category = path_segment("type", category)?;
        Ok(HttpRequest::get(format!("{}/type/{category}", self.base_url)))
    }

    /// Follow a reference taken from a listing. The URL is used verbatim.
    pub fn build_get_detail(&self, reference: &NamedResource) -> HttpRequest {
        HttpRequest::get(reference.url.clone())
    }

    pub fn parse_creature(&self, identifier: &str, response: HttpResponse) -> Result<Creature, ApiError> {
        expect_found(&response, || format!("pokemon '{}'", identifier.trim()))?;
        let doc: CreatureDocument = decode(&response)?;
        Creature::try_from(doc)
    }

    pub fn parse_detail(&self, response: HttpResponse) -> Result<Creature, ApiError> {
        expect_success(&response)?;
        let doc: CreatureDocument = decode(&response)?;
        Creature::try_from(doc)
    }

    pub fn parse_creature_page(&self, response: HttpResponse) -> Result<Vec<NamedResource>, ApiError> {
        expect_success(&response)?;
        let page: CreaturePage = decode(&response)?;
        followable(page.results)
    }

    pub fn parse_category(&self, category: &str, response: HttpResponse) -> Result<Vec<NamedResource>, ApiError> {
        expect_found(&response, || format!("type '{}'", category.trim()))?;
        let doc: CategoryDocument = decode(&response)?;
        followable(doc.pokemon.into_iter().map(|member| member.pokemon).collect())
    }
}

/// Reject identifiers that would change the shape of the upstream URL.
fn path_segment<'a>(what: &str, raw: &'a str) -> Result<&'a str, ApiError> {
    let segment = raw.trim();
    if segment.is_empty() {
        return Err(ApiError::InvalidArgument(format!("{what} must not be empty")));
    }
    if let Some(bad) = segment
        .chars()
        .find(|&c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(ApiError::InvalidArgument(format!(
            "{what} '{segment}' contains illegal character {bad:?}"
        )));
    }
    Ok(segment)
}

fn expect_found(response: &HttpResponse, resource: impl FnOnce() -> String) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::NotFound(resource()))
}

fn expect_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::UpstreamStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Every reference must carry a URL before any detail fetch is issued.
fn followable(references: Vec<NamedResource>) -> Result<Vec<NamedResource>, ApiError> {
    if let Some(bad) = references.iter().find(|r| r.url.trim().is_empty()) {
        return Err(ApiError::UpstreamMalformed(format!(
            "reference '{}' has an empty url",
            bad.name
        )));
    }
    Ok(references)
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::UpstreamMalformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PokeApiClient {
        PokeApiClient::new("http://localhost:3000")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn status(code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status: code,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_creature_produces_correct_request() {
        let req = client().build_get_creature("pikachu").unwrap();
        assert_eq!(req.url, "http://localhost:3000/pokemon/pikachu");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_get_creature_accepts_numeric_id_and_trims() {
        let req = client().build_get_creature(" 25 ").unwrap();
        assert_eq!(req.url, "http://localhost:3000/pokemon/25");
    }

    #[test]
    fn build_get_creature_rejects_path_injection() {
        let err = client().build_get_creature("../type/fire").unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        let err = client().build_get_creature("   ").unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        let err = client().build_get_creature("pika?chu").unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn build_list_creatures_encodes_page() {
        let req = client().build_list_creatures(Page { limit: 2, offset: 40 });
        assert_eq!(req.url, "http://localhost:3000/pokemon?limit=2&offset=40");
        let req = client().build_list_creatures(Page::default());
        assert_eq!(req.url, "http://localhost:3000/pokemon?limit=10&offset=0");
    }

    #[test]
    fn build_get_category_produces_correct_request() {
        let req = client().build_get_category("electric").unwrap();
        assert_eq!(req.url, "http://localhost:3000/type/electric");
    }

    #[test]
    fn build_get_detail_uses_reference_url_verbatim() {
        let reference = NamedResource {
            name: "bulbasaur".to_string(),
            url: "https://pokeapi.co/api/v2/pokemon/1/".to_string(),
        };
        let req = client().build_get_detail(&reference);
        assert_eq!(req.url, "https://pokeapi.co/api/v2/pokemon/1/");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PokeApiClient::new("http://localhost:3000/");
        let req = client.build_get_category("fire").unwrap();
        assert_eq!(req.url, "http://localhost:3000/type/fire");
    }

    #[test]
    fn parse_creature_success() {
        let body = r#"{"id":1,"name":"bulbasaur","height":7,"weight":69,
            "abilities":[{"ability":{"name":"overgrow","url":"x"},"slot":1}]}"#;
        let creature = client().parse_creature("bulbasaur", ok(body)).unwrap();
        assert_eq!(creature.name, "bulbasaur");
        assert_eq!(creature.abilities.len(), 1);
        assert_eq!(creature.abilities[0].name, "overgrow");
    }

    #[test]
    fn parse_creature_not_found_on_any_failure_status() {
        let err = client()
            .parse_creature("does-not-exist", status(404, "Not Found"))
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound("pokemon 'does-not-exist'".to_string()));

        let err = client().parse_creature("x", status(500, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn parse_creature_bad_json() {
        let err = client().parse_creature("x", ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::UpstreamMalformed(_)));
    }

    #[test]
    fn parse_creature_wrong_shape() {
        let err = client()
            .parse_creature("x", ok(r#"{"id":1,"name":"a"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::UpstreamMalformed(_)));
    }

    #[test]
    fn parse_detail_wrong_status_is_upstream_fault() {
        let err = client().parse_detail(status(502, "bad gateway")).unwrap_err();
        assert_eq!(
            err,
            ApiError::UpstreamStatus {
                status: 502,
                body: "bad gateway".to_string()
            }
        );
    }

    #[test]
    fn parse_creature_page_success() {
        let body = r#"{"count":1302,"next":null,"previous":null,"results":[
            {"name":"bulbasaur","url":"https://pokeapi.co/api/v2/pokemon/1/"},
            {"name":"ivysaur","url":"https://pokeapi.co/api/v2/pokemon/2/"}]}"#;
        let refs = client().parse_creature_page(ok(body)).unwrap();
        let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["bulbasaur", "ivysaur"]);
        assert_eq!(refs[1].url, "https://pokeapi.co/api/v2/pokemon/2/");
    }

    #[test]
    fn parse_creature_page_reference_without_url_is_malformed() {
        let err = client()
            .parse_creature_page(ok(r#"{"results":[{"name":"bulbasaur"}]}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::UpstreamMalformed(_)));

        let err = client()
            .parse_creature_page(ok(r#"{"results":[{"name":"bulbasaur","url":""}]}"#))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::UpstreamMalformed("reference 'bulbasaur' has an empty url".to_string())
        );
    }

    #[test]
    fn parse_category_member_without_url_is_malformed() {
        let body = r#"{"name":"electric","pokemon":[{"pokemon":{"name":"pikachu"},"slot":1}]}"#;
        let err = client().parse_category("electric", ok(body)).unwrap_err();
        assert!(matches!(err, ApiError::UpstreamMalformed(_)));
    }

    #[test]
    fn ability_url_is_not_required() {
        let body = r#"{"id":25,"name":"pikachu","height":4,"weight":60,
            "abilities":[{"ability":{"name":"static"},"slot":1}]}"#;
        let creature = client().parse_detail(ok(body)).unwrap();
        assert_eq!(creature.abilities[0].name, "static");
    }

    #[test]
    fn parse_creature_page_failure_status() {
        let err = client().parse_creature_page(status(500, "")).unwrap_err();
        assert!(matches!(err, ApiError::UpstreamStatus { status: 500, .. }));
    }

    #[test]
    fn parse_category_success() {
        let body = r#"{"name":"electric","pokemon":[
            {"pokemon":{"name":"pikachu","url":"https://pokeapi.co/api/v2/pokemon/25/"},"slot":1},
            {"pokemon":{"name":"raichu","url":"https://pokeapi.co/api/v2/pokemon/26/"},"slot":1}]}"#;
        let refs = client().parse_category("electric", ok(body)).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "pikachu");
    }

    #[test]
    fn parse_category_not_found() {
        let err = client()
            .parse_category("not-a-type", status(404, "Not Found"))
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound("type 'not-a-type'".to_string()));
    }
}
