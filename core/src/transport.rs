//! The I/O seam between the aggregator and the network.
//!
//! A `Transport` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`, whatever its status. Interpreting the status is the job of
//! `PokeApiClient::parse_*`; a transport only fails when no response could be
//! obtained at all, and then always with `ApiError::UpstreamUnavailable`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}
