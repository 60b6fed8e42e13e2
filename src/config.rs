//! Server configuration from the environment.
//!
//! DESIGN
//! ======
//! Every setting has a default, so a bare `cargo run` serves an in-memory
//! store on port 3000. Values are read once at startup; nothing here is
//! consulted per request.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Parse `key` if set. Unset or blank is `Ok(None)`; garbage is an error.
pub(crate) fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| ConfigError::Invalid { key, value: raw })
}

/// Split a comma-separated list, dropping blanks.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Raw administrator tokens. Empty means one is generated at startup.
    pub admin_tokens: Vec<String>,
    pub cors_allow_any: bool,
    /// Request body cap for template saves; images travel as data URIs.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            admin_tokens: Vec::new(),
            cors_allow_any: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Load from `BIND_ADDR`, `PORT`, `DATABASE_URL`, `DB_MAX_CONNECTIONS`,
    /// `ADMIN_TOKENS`, `CORS_ALLOW_ANY`, and `MAX_BODY_BYTES`.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: env_parse("BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            port: env_parse("PORT")?.unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS")?.unwrap_or(defaults.db_max_connections),
            admin_tokens: std::env::var("ADMIN_TOKENS").map(|raw| split_list(&raw)).unwrap_or_default(),
            cors_allow_any: env_bool("CORS_ALLOW_ANY").unwrap_or(defaults.cors_allow_any),
            max_body_bytes: env_parse("MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes),
        })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
