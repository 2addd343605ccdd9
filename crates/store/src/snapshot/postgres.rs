//! Postgres-backed snapshot procedure.

use async_trait::async_trait;
use sqlx::PgPool;

use super::OpeningStockProcedure;
use crate::stock::StoreError;

/// Invokes the stored snapshot routine with elevated privilege.
///
/// The pool must be connected with the service credential; this handle is
/// the only place that credential is used.
#[derive(Debug, Clone)]
pub struct PostgresOpeningStock {
    pool: PgPool,
}

impl PostgresOpeningStock {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OpeningStockProcedure for PostgresOpeningStock {
    async fn capture(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT capture_opening_stock()")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}
