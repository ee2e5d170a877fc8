//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VIZEVAL_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::evaluator::DEFAULT_MEDICAL_MODEL;
use crate::service::DEFAULT_POLL_INTERVAL;

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VIZEVAL_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Worker poll interval when the queue is empty. Default: 500ms.
    pub poll_interval: Duration,

    /// Base URL of a PostgREST-compatible repository backend. When unset,
    /// the in-memory backend is used.
    pub rest_url: Option<String>,

    /// Service key for the REST backend.
    pub rest_service_key: Option<String>,

    /// Model the medical evaluator speaks to.
    pub medical_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            poll_interval: DEFAULT_POLL_INTERVAL,
            rest_url: None,
            rest_service_key: None,
            medical_model: DEFAULT_MEDICAL_MODEL.to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "VIZEVAL_PORT";
    const ENV_BIND_ADDR: &'static str = "VIZEVAL_BIND_ADDR";
    const ENV_POLL_INTERVAL_MS: &'static str = "VIZEVAL_POLL_INTERVAL_MS";
    const ENV_REST_URL: &'static str = "VIZEVAL_REST_URL";
    const ENV_REST_SERVICE_KEY: &'static str = "VIZEVAL_REST_SERVICE_KEY";
    const ENV_MEDICAL_MODEL: &'static str = "VIZEVAL_MEDICAL_MODEL";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let poll_interval = Self::parse_poll_interval_from_env(defaults.poll_interval)?;
        let rest_url = Self::parse_optional_string_from_env(Self::ENV_REST_URL);
        let rest_service_key = Self::parse_optional_string_from_env(Self::ENV_REST_SERVICE_KEY);
        let medical_model =
            Self::parse_string_from_env(Self::ENV_MEDICAL_MODEL, defaults.medical_model);

        Ok(Self {
            port,
            bind_addr,
            poll_interval,
            rest_url,
            rest_service_key,
            medical_model,
        })
    }

    /// Validates cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rest_url.is_some() != self.rest_service_key.is_some() {
            return Err(ConfigError::IncompleteRestConfig);
        }
        Ok(())
    }

    /// Returns `bind_addr:port` as a socket address string.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_poll_interval_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_POLL_INTERVAL_MS) {
            Ok(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
                _ => Err(ConfigError::InvalidPollInterval { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(key: &str, default: String) -> String {
        env::var(key).unwrap_or(default)
    }

    fn parse_optional_string_from_env(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}
