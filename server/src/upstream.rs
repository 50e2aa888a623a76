//! `Transport` backed by `reqwest`.
//!
//! One attempt per request, bounded by the client-wide timeout. Any failure to
//! obtain a full response (connect error, timeout, unreadable body) becomes
//! `ApiError::UpstreamUnavailable`; the status code is passed through as data.

use std::time::Duration;

use async_trait::async_trait;
use pokegraph_core::{ApiError, HttpRequest, HttpResponse, Transport};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokegraph/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(unavailable)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(unavailable)?;
        debug!(url = %request.url, status, bytes = body.len(), "upstream responded");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn unavailable(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::UpstreamUnavailable(format!("request timed out: {err}"))
    } else {
        ApiError::UpstreamUnavailable(err.to_string())
    }
}
