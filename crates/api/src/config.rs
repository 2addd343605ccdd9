//! Process configuration, read from the environment once at startup.

use std::net::SocketAddr;

use thiserror::Error;

/// Backing-store selection.
///
/// The service URL carries the elevated credential used only for the
/// opening-stock snapshot procedure; the application URL covers everything
/// else, including session verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// In-memory stores (dev/test).
    InMemory,
    /// Postgres-backed stores.
    Postgres {
        database_url: String,
        service_database_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("SERVICE_DATABASE_URL must be set when DATABASE_URL is set")]
    MissingServiceUrl,
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    ///
    /// `DATABASE_URL` selects Postgres-backed stores and then requires
    /// `SERVICE_DATABASE_URL` (the elevated credential). Without it the
    /// service runs on in-memory stores.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("DATABASE_URL").ok(),
            std::env::var("SERVICE_DATABASE_URL").ok(),
        )
    }

    fn build(
        bind_addr: Option<String>,
        database_url: Option<String>,
        service_database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind_addr = match bind_addr {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { value, source })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let store = match database_url {
            Some(database_url) => {
                let service_database_url =
                    service_database_url.ok_or(ConfigError::MissingServiceUrl)?;
                StoreConfig::Postgres {
                    database_url,
                    service_database_url,
                }
            }
            None => StoreConfig::InMemory,
        };

        Ok(Self { bind_addr, store })
    }
}
