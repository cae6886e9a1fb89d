//! Runtime configuration from environment variables.
//!
//! `main` loads a `.env` file first (via dotenvy), so local development can
//! keep these in a file while deployments set them directly.

use std::net::SocketAddr;
use std::time::Duration;

pub const API_BASE_URL: &str = "APARTE_API_BASE_URL";
pub const API_TOKEN: &str = "APARTE_API_TOKEN";
pub const BIND_ADDR: &str = "APARTE_BIND_ADDR";
pub const API_TIMEOUT_SECS: &str = "APARTE_API_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Remote API settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as a bearer token when present
    pub token: Option<String>,
    pub timeout: Duration,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = get(API_BASE_URL).ok_or(ConfigError::Missing(API_BASE_URL))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: API_BASE_URL,
                value: base_url,
            });
        }

        let bind_addr = get(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
            name: BIND_ADDR,
            value: bind_addr.clone(),
        })?;

        let timeout_secs = match get(API_TIMEOUT_SECS) {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: API_TIMEOUT_SECS,
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api: ApiConfig {
                base_url,
                token: get(API_TOKEN),
                timeout: Duration::from_secs(timeout_secs),
            },
            bind_addr,
        })
    }
}
