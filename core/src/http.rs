//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe upstream requests and responses as plain data.
//! `PokeApiClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; a `Transport` implementation owns the
//! actual I/O. Every upstream call is a read-only GET, so a request is just a
//! URL plus headers.

/// An upstream GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub(crate) fn get(url: String) -> Self {
        Self {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// An upstream response described as plain data.
///
/// Constructed by a `Transport` after executing an `HttpRequest`, then passed
/// to `PokeApiClient::parse_*` for status checks and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
