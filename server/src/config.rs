//! Command-line and environment configuration for the `pokegraph` binary.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::time::Duration;

use clap::Parser;
use pokegraph_core::{FanOut, DEFAULT_BASE_URL};

#[derive(Parser, Debug, Clone)]
#[command(name = "pokegraph", version, about = "GraphQL façade over the Pokémon REST API")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "LISTEN_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Base URL of the upstream REST API
    #[arg(long, env = "UPSTREAM_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_url: String,

    /// Per-request upstream timeout, in seconds
    #[arg(
        long,
        env = "UPSTREAM_TIMEOUT_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub upstream_timeout_secs: u64,

    /// Cap on concurrent detail fetches per listing; unbounded when unset
    #[arg(long, env = "MAX_IN_FLIGHT")]
    pub max_in_flight: Option<NonZeroUsize>,

    /// Deepest selection set a query may request
    #[arg(long, env = "MAX_QUERY_DEPTH", default_value_t = 8)]
    pub max_query_depth: usize,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn fan_out(&self) -> FanOut {
        FanOut {
            max_in_flight: self.max_in_flight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "pokegraph",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--upstream-url",
            "http://localhost:3000",
            "--upstream-timeout-secs",
            "2",
            "--max-in-flight",
            "16",
            "--max-query-depth",
            "4",
        ])
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.upstream_url, "http://localhost:3000");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(2));
        assert_eq!(config.fan_out(), FanOut::bounded(NonZeroUsize::new(16).unwrap()));
        assert_eq!(config.max_query_depth, 4);
    }

    #[test]
    fn zero_in_flight_is_rejected() {
        let result = Config::try_parse_from(["pokegraph", "--max-in-flight", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Config::try_parse_from(["pokegraph", "--upstream-timeout-secs", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_host_is_rejected() {
        let result = Config::try_parse_from(["pokegraph", "--host", "not-an-ip"]);
        assert!(result.is_err());
    }
}
