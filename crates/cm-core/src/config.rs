//! Configuration types and loading
//!
//! Sources are layered: built-in defaults, then an optional
//! `config/ledger.{toml,yaml,json}` file, then `LEDGER_*` environment
//! variables (`LEDGER_SERVER__PORT=9000`). `DATABASE_URL` wins over all of
//! them for the database url.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{is_storable, max_stored_decimal, DEFAULT_DAILY_HOUR_CAP};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Postgres url; the in-memory store is used when unset
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Hours a consultant may log per calendar date
    pub daily_hour_cap: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 5,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            ledger: LedgerConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            daily_hour_cap: Decimal::from(DEFAULT_DAILY_HOUR_CAP),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config source error: {0}")]
    Source(#[from] config::ConfigError),
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from defaults, optional file, and environment
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config/ledger").required(false))
            .add_source(
                config::Environment::with_prefix("LEDGER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        let mut config: Self = settings.try_deserialize()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = Some(url);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.daily_hour_cap <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                key: "ledger.daily_hour_cap".into(),
                message: "must be greater than 0".into(),
            });
        }
        if !is_storable(self.ledger.daily_hour_cap) {
            return Err(ConfigError::InvalidValue {
                key: "ledger.daily_hour_cap".into(),
                message: format!(
                    "must have at most 2 decimal places and not exceed {}",
                    max_stored_decimal()
                ),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}
