use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pharmacore_inventory::{PurchaseOrderId, StockItemId};

use super::{AppliedCorrection, StockStore, StoreError};

/// In-memory stock store for tests/dev.
///
/// Seeding rows is deliberately a separate, non-trait surface: creating and
/// destroying inventory records belongs to inventory management, not to the
/// correction workflow.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    items: RwLock<HashMap<StockItemId, i64>>,
    receipts: RwLock<HashMap<(PurchaseOrderId, StockItemId), i64>>,
    corrections: RwLock<Vec<AppliedCorrection>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stock row.
    pub fn insert_item(&self, item: StockItemId, quantity: i64) {
        if let Ok(mut items) = self.items.write() {
            items.insert(item, quantity);
        }
    }

    /// Seed a purchase-order line.
    pub fn insert_receipt(&self, order: PurchaseOrderId, item: StockItemId, quantity: i64) {
        if let Ok(mut receipts) = self.receipts.write() {
            receipts.insert((order, item), quantity);
        }
    }

    /// Observe a purchase-order line's received quantity.
    pub fn receipt(&self, order: PurchaseOrderId, item: StockItemId) -> Option<i64> {
        let receipts = self.receipts.read().ok()?;
        receipts.get(&(order, item)).copied()
    }
}

fn poisoned() -> StoreError {
    StoreError::Query("store lock poisoned".to_string())
}

#[async_trait]
impl StockStore for InMemoryStockStore {
    async fn current_stock(&self, item: StockItemId) -> Result<Option<i64>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(&item).copied())
    }

    async fn set_current_stock(&self, item: StockItemId, quantity: i64) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        match items.get_mut(&item) {
            Some(current) => *current = quantity,
            None => tracing::warn!(item = %item, "stock update matched no row"),
        }
        Ok(())
    }

    async fn set_received_quantity(
        &self,
        order: PurchaseOrderId,
        item: StockItemId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        let mut receipts = self.receipts.write().map_err(|_| poisoned())?;
        match receipts.get_mut(&(order, item)) {
            Some(current) => *current = quantity,
            None => {
                tracing::warn!(order = %order, item = %item, "receipt update matched no row");
            }
        }
        Ok(())
    }

    async fn record_correction(&self, record: AppliedCorrection) -> Result<(), StoreError> {
        let mut corrections = self.corrections.write().map_err(|_| poisoned())?;
        corrections.push(record);
        Ok(())
    }

    async fn corrections(&self) -> Result<Vec<AppliedCorrection>, StoreError> {
        let corrections = self.corrections.read().map_err(|_| poisoned())?;
        let mut out = corrections.clone();
        out.reverse();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_back_seeded_stock() {
        let store = InMemoryStockStore::new();
        store.insert_item(StockItemId::new(18), 1000);

        assert_eq!(
            store.current_stock(StockItemId::new(18)).await.unwrap(),
            Some(1000)
        );
        assert_eq!(store.current_stock(StockItemId::new(99)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn writes_to_missing_rows_are_no_ops() {
        let store = InMemoryStockStore::new();

        store
            .set_current_stock(StockItemId::new(18), 42)
            .await
            .unwrap();
        store
            .set_received_quantity(PurchaseOrderId::new(12), StockItemId::new(18), 42)
            .await
            .unwrap();

        assert_eq!(store.current_stock(StockItemId::new(18)).await.unwrap(), None);
        assert_eq!(
            store.receipt(PurchaseOrderId::new(12), StockItemId::new(18)),
            None
        );
    }

    #[tokio::test]
    async fn overwrites_existing_receipt() {
        let store = InMemoryStockStore::new();
        let order = PurchaseOrderId::new(12);
        let item = StockItemId::new(18);
        store.insert_receipt(order, item, 0);

        store.set_received_quantity(order, item, 2500).await.unwrap();

        assert_eq!(store.receipt(order, item), Some(2500));
    }
}
