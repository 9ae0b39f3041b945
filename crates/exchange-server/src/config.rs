//! Configuration for the exchange server.
//!
//! Defaults can be overridden via environment variables:
//!
//! - `EXCHANGE_BIND_ADDR`      (default: "0.0.0.0")
//! - `EXCHANGE_PORT`           (default: "9000")
//! - `EXCHANGE_MAX_CLIENTS`    (default: "1024")
//! - `EXCHANGE_QUEUE_CAPACITY` (default: "100")

use std::env;
use std::str::FromStr;

use anyhow::{ensure, Context};

/// Default capacity of the inbound queue and every engine queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    /// Bound of the router's inbound queue and of each engine queue.
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 9000,
            max_clients: 1024,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();
        let config = Config {
            bind_addr: lookup("EXCHANGE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_or_default(&lookup, "EXCHANGE_PORT", defaults.port)?,
            max_clients: parse_or_default(&lookup, "EXCHANGE_MAX_CLIENTS", defaults.max_clients)?,
            queue_capacity: parse_or_default(
                &lookup,
                "EXCHANGE_QUEUE_CAPACITY",
                defaults.queue_capacity,
            )?,
        };
        ensure!(config.queue_capacity > 0, "EXCHANGE_QUEUE_CAPACITY must be at least 1");
        Ok(config)
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value {:?} for {}", val, key)),
        None => Ok(default),
    }
}
