//! Application configuration
//!
//! Read once at startup and passed by reference to whoever needs it. Nothing else in the
//! engine reads the process environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default dofus-portals API endpoint.
pub const DEFAULT_DOFUS_PORTALS_URL: &str = "https://api.dofus-portals.fr";

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// dofus-portals API access
    pub dofus_portals: DofusPortalsConfig,

    /// Reference tables database
    pub mysql: MySqlConfig,

    /// Broker transport listen address
    pub server_host: String,
    pub server_port: u16,

    /// Log level applied to the workspace crates when RUST_LOG is unset
    pub log_level: String,
}

/// dofus-portals API configuration
#[derive(Clone)]
pub struct DofusPortalsConfig {
    /// API base URL
    pub base_url: String,
    /// Static API key sent with every request
    pub token: String,
    /// Per-request fetch timeout
    pub timeout: Duration,
}

// Keeps the token out of logs.
impl std::fmt::Debug for DofusPortalsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DofusPortalsConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// MySQL connection settings
///
/// Kept as separate parts, never as a URL, so credentials need no escaping.
#[derive(Clone)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl std::fmt::Debug for MySqlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

/// Default MySQL port when `MYSQL_URL` has none.
const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Split `host[:port]`.
fn parse_mysql_address(address: &str) -> Result<(String, u16)> {
    match address.trim().rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse()
                .with_context(|| format!("MYSQL_URL port is invalid: {}", port))?;
            Ok((host.to_string(), port))
        }
        None => Ok((address.trim().to_string(), DEFAULT_MYSQL_PORT)),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout_secs: u64 = var("HTTP_TIMEOUT", "10")
            .trim()
            .parse()
            .context("HTTP_TIMEOUT must be a number of seconds")?;

        let (mysql_host, mysql_port) = parse_mysql_address(&var("MYSQL_URL", "localhost:3306"))?;

        Ok(Self {
            dofus_portals: DofusPortalsConfig {
                base_url: var("DOFUS_PORTALS_URL", DEFAULT_DOFUS_PORTALS_URL),
                token: var("DOFUS_PORTALS_TOKEN", ""),
                timeout: Duration::from_secs(timeout_secs),
            },

            mysql: MySqlConfig {
                host: mysql_host,
                port: mysql_port,
                user: var("MYSQL_USER", ""),
                password: var("MYSQL_PASSWORD", ""),
                database: var("MYSQL_DATABASE", "kaellybot"),
            },

            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port: var("SERVER_PORT", "3000")
                .trim()
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            log_level: var("LOG_LEVEL", "info"),
        })
    }
}
