//! Store wiring: pick capability implementations from configuration.

use std::sync::Arc;

use sqlx::PgPool;

use pharmacore_store::{
    InMemoryOpeningStock, InMemorySessionVerifier, InMemoryStockStore, OpeningStockProcedure,
    PostgresOpeningStock, PostgresSessionVerifier, PostgresStockStore, SessionVerifier, StockStore,
};

use crate::config::StoreConfig;

/// Capability handles shared by all request handlers.
///
/// `snapshot` is the only handle constructed from the elevated credential;
/// nothing else may use that credential.
#[derive(Clone)]
pub struct AppServices {
    pub stock: Arc<dyn StockStore>,
    pub sessions: Arc<dyn SessionVerifier>,
    pub snapshot: Arc<dyn OpeningStockProcedure>,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self {
            stock: Arc::new(InMemoryStockStore::new()),
            sessions: Arc::new(InMemorySessionVerifier::new()),
            snapshot: Arc::new(InMemoryOpeningStock::new()),
        }
    }
}

pub async fn build_services(config: &StoreConfig) -> Result<AppServices, sqlx::Error> {
    match config {
        StoreConfig::InMemory => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres {
            database_url,
            service_database_url,
        } => {
            let pool = PgPool::connect(database_url).await?;
            let service_pool = PgPool::connect(service_database_url).await?;

            Ok(AppServices {
                stock: Arc::new(PostgresStockStore::new(pool.clone())),
                sessions: Arc::new(PostgresSessionVerifier::new(pool)),
                snapshot: Arc::new(PostgresOpeningStock::new(service_pool)),
            })
        }
    }
}
