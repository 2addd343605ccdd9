//! Postgres-backed stock store.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use pharmacore_inventory::{PurchaseOrderId, StockItemId};

use super::{AppliedCorrection, StockStore, StoreError};

/// Postgres-backed stock store.
///
/// Every method issues exactly one statement against the pool; nothing here
/// opens a long-lived transaction.
#[derive(Debug, Clone)]
pub struct PostgresStockStore {
    pool: PgPool,
}

impl PostgresStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn query_error(e: sqlx::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

#[async_trait]
impl StockStore for PostgresStockStore {
    async fn current_stock(&self, item: StockItemId) -> Result<Option<i64>, StoreError> {
        let row = sqlx::query("SELECT current_stock FROM stock_items WHERE id = $1")
            .bind(item.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let quantity = row.try_get::<i64, _>("current_stock").map_err(query_error)?;
                Ok(Some(quantity))
            }
            None => Ok(None),
        }
    }

    async fn set_current_stock(&self, item: StockItemId, quantity: i64) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE stock_items SET current_stock = $2 WHERE id = $1")
            .bind(item.as_i64())
            .bind(quantity)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            tracing::warn!(item = %item, "stock update matched no row");
        }
        Ok(())
    }

    async fn set_received_quantity(
        &self,
        order: PurchaseOrderId,
        item: StockItemId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE purchase_order_items
            SET received_quantity = $3
            WHERE purchase_order_id = $1 AND stock_item_id = $2
            "#,
        )
        .bind(order.as_i64())
        .bind(item.as_i64())
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            tracing::warn!(order = %order, item = %item, "receipt update matched no row");
        }
        Ok(())
    }

    async fn record_correction(&self, record: AppliedCorrection) -> Result<(), StoreError> {
        let steps = serde_json::to_value(&record.steps)
            .map_err(|e| StoreError::Encoding(e.to_string()))?;

        sqlx::query(
            "INSERT INTO stock_corrections (reference, applied_at, steps) VALUES ($1, $2, $3)",
        )
        .bind(&record.reference)
        .bind(record.applied_at)
        .bind(steps)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn corrections(&self) -> Result<Vec<AppliedCorrection>, StoreError> {
        let rows = sqlx::query(
            "SELECT reference, applied_at, steps FROM stock_corrections ORDER BY applied_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.into_iter()
            .map(|row| {
                let steps = row
                    .try_get::<serde_json::Value, _>("steps")
                    .map_err(query_error)?;
                Ok(AppliedCorrection {
                    reference: row.try_get("reference").map_err(query_error)?,
                    applied_at: row.try_get("applied_at").map_err(query_error)?,
                    steps: serde_json::from_value(steps)
                        .map_err(|e| StoreError::Encoding(e.to_string()))?,
                })
            })
            .collect()
    }
}
