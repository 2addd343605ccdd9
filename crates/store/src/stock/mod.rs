//! Row-level access to stock and purchase-order receipt records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pharmacore_inventory::{PurchaseOrderId, StockItemId};

use crate::corrector::CommittedStep;

mod in_memory;
mod postgres;

pub use in_memory::InMemoryStockStore;
pub use postgres::PostgresStockStore;

/// Store operation error.
///
/// Infrastructure failures only. The `Query` message is the store's own
/// error text and is surfaced verbatim to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A read/write/RPC against the store failed.
    #[error("{0}")]
    Query(String),

    /// A value could not be encoded for storage.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Audit record of a fully applied correction batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCorrection {
    pub reference: String,
    pub applied_at: DateTime<Utc>,
    pub steps: Vec<CommittedStep>,
}

/// Row-level access to stock and purchase-order receipt records.
///
/// Every method is a single remote statement that commits independently;
/// callers own any multi-step sequencing.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Current on-hand quantity, or `None` when the row does not exist.
    async fn current_stock(&self, item: StockItemId) -> Result<Option<i64>, StoreError>;

    /// Overwrite the on-hand quantity for a stock item.
    ///
    /// Writing to a missing row is a no-op, matching a predicate update
    /// that matches zero rows.
    async fn set_current_stock(&self, item: StockItemId, quantity: i64) -> Result<(), StoreError>;

    /// Overwrite the received quantity on a purchase-order line.
    async fn set_received_quantity(
        &self,
        order: PurchaseOrderId,
        item: StockItemId,
        quantity: i64,
    ) -> Result<(), StoreError>;

    /// Append an audit record for a fully applied batch.
    async fn record_correction(&self, record: AppliedCorrection) -> Result<(), StoreError>;

    /// Applied-correction audit trail, newest first.
    async fn corrections(&self) -> Result<Vec<AppliedCorrection>, StoreError>;
}

#[async_trait]
impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    async fn current_stock(&self, item: StockItemId) -> Result<Option<i64>, StoreError> {
        (**self).current_stock(item).await
    }

    async fn set_current_stock(&self, item: StockItemId, quantity: i64) -> Result<(), StoreError> {
        (**self).set_current_stock(item, quantity).await
    }

    async fn set_received_quantity(
        &self,
        order: PurchaseOrderId,
        item: StockItemId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        (**self).set_received_quantity(order, item, quantity).await
    }

    async fn record_correction(&self, record: AppliedCorrection) -> Result<(), StoreError> {
        (**self).record_correction(record).await
    }

    async fn corrections(&self) -> Result<Vec<AppliedCorrection>, StoreError> {
        (**self).corrections().await
    }
}
