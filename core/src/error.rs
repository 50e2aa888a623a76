//! Error types for the upstream client and aggregator.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a missing creature or
//! category is an ordinary query outcome, not an outage. Every other upstream
//! problem is either "we could not get a usable answer" (`UpstreamUnavailable`,
//! `UpstreamStatus`) or "we got an answer we cannot read" (`UpstreamMalformed`).
//! `ErrorKind` collapses the variants into the stable codes the inbound
//! transport reports to its callers.

use thiserror::Error;

/// Errors returned by `PokeApiClient`, `Transport` implementations and the
/// `Aggregator`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The upstream reported that the primary resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The request never produced a response: connect failure, timeout or a
    /// body that could not be read.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream answered a secondary request with a non-2xx status.
    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The response body is not JSON or does not have the expected shape.
    #[error("malformed upstream response: {0}")]
    UpstreamMalformed(String),

    /// A caller-supplied argument was rejected before any upstream call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Coarse classification of an `ApiError`, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    UpstreamUnavailable,
    UpstreamMalformed,
    InvalidArgument,
}

impl ErrorKind {
    /// Machine-readable code, e.g. for a GraphQL error's `extensions.code`.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorKind::UpstreamMalformed => "UPSTREAM_MALFORMED",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
        }
    }
}

impl ApiError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::UpstreamUnavailable(_) | ApiError::UpstreamStatus { .. } => {
                ErrorKind::UpstreamUnavailable
            }
            ApiError::UpstreamMalformed(_) => ErrorKind::UpstreamMalformed,
            ApiError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_count_as_unavailable() {
        let err = ApiError::UpstreamStatus {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert_eq!(err.kind().code(), "UPSTREAM_UNAVAILABLE");
        assert_eq!(err.to_string(), "upstream returned HTTP 503: maintenance");
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let err = ApiError::NotFound("pokemon 'missingno'".to_string());
        assert_eq!(err.to_string(), "pokemon 'missingno' not found");
        assert_eq!(err.kind().code(), "NOT_FOUND");
    }
}
