//! Correction engine: applies a batch of stock corrections against the
//! store, one independently committed statement at a time.
//!
//! There is deliberately no enclosing transaction: a failure mid-sequence
//! leaves the earlier mutations committed. The engine keeps a ledger of
//! committed steps and returns it with any failure, so partial state is
//! observable instead of silent. Concurrent runs against the same items
//! race on the read-modify-write and can mis-apply a delta; that is
//! acceptable for a repair tool, not for a general reconciliation API.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pharmacore_inventory::{CorrectionBatch, PurchaseOrderId, StockItemId};

use crate::stock::{AppliedCorrection, StockStore, StoreError};

/// A store mutation that has already committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CommittedStep {
    StockAdjusted {
        label: String,
        item_id: StockItemId,
        previous: i64,
        new_stock: i64,
    },
    ReceiptOverwritten {
        label: String,
        purchase_order_id: PurchaseOrderId,
        item_id: StockItemId,
        received_quantity: i64,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorrectionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Applying the delta would take the item below zero on hand.
    #[error("stock for '{label}' cannot go negative ({current} {delta:+})")]
    NegativeStock {
        label: String,
        current: i64,
        delta: i64,
    },
}

/// A failed run: the error plus every mutation that had already committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionFailure {
    pub error: CorrectionError,
    pub committed: Vec<CommittedStep>,
}

/// Outcome of a fully applied batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionOutcome {
    pub reference: String,
    /// `(label, new on-hand quantity)` per entry, in batch order.
    pub new_stock: Vec<(String, i64)>,
    pub committed: Vec<CommittedStep>,
}

/// Apply a validated batch: read-modify-write each item's on-hand quantity,
/// then overwrite each purchase-order receipt, then append the audit record.
///
/// A missing stock row reads as quantity zero and the write proceeds.
pub async fn apply_batch(
    store: &dyn StockStore,
    batch: &CorrectionBatch,
) -> Result<CorrectionOutcome, CorrectionFailure> {
    let mut committed = Vec::new();
    let mut new_stock = Vec::new();

    for entry in &batch.entries {
        let current = match store.current_stock(entry.item_id).await {
            Ok(quantity) => quantity.unwrap_or(0),
            Err(e) => return Err(fail(e.into(), committed)),
        };

        let updated = current + entry.delta;
        if updated < 0 {
            let error = CorrectionError::NegativeStock {
                label: entry.label.clone(),
                current,
                delta: entry.delta,
            };
            return Err(fail(error, committed));
        }

        if let Err(e) = store.set_current_stock(entry.item_id, updated).await {
            return Err(fail(e.into(), committed));
        }

        tracing::info!(
            label = %entry.label,
            item = %entry.item_id,
            previous = current,
            new_stock = updated,
            "stock adjusted"
        );
        committed.push(CommittedStep::StockAdjusted {
            label: entry.label.clone(),
            item_id: entry.item_id,
            previous: current,
            new_stock: updated,
        });
        new_stock.push((entry.label.clone(), updated));
    }

    for entry in &batch.entries {
        if let Err(e) = store
            .set_received_quantity(entry.purchase_order_id, entry.item_id, entry.received_quantity)
            .await
        {
            return Err(fail(e.into(), committed));
        }

        committed.push(CommittedStep::ReceiptOverwritten {
            label: entry.label.clone(),
            purchase_order_id: entry.purchase_order_id,
            item_id: entry.item_id,
            received_quantity: entry.received_quantity,
        });
    }

    let record = AppliedCorrection {
        reference: batch.reference.clone(),
        applied_at: Utc::now(),
        steps: committed.clone(),
    };
    if let Err(e) = store.record_correction(record).await {
        return Err(fail(e.into(), committed));
    }

    Ok(CorrectionOutcome {
        reference: batch.reference.clone(),
        new_stock,
        committed,
    })
}

fn fail(error: CorrectionError, committed: Vec<CommittedStep>) -> CorrectionFailure {
    if committed.is_empty() {
        tracing::warn!(error = %error, "correction failed before any mutation");
    } else {
        tracing::warn!(
            error = %error,
            steps = committed.len(),
            "correction failed after partial commit"
        );
    }
    CorrectionFailure { error, committed }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use pharmacore_inventory::StockCorrection;

    use super::*;
    use crate::stock::InMemoryStockStore;

    fn seeded_store() -> InMemoryStockStore {
        let store = InMemoryStockStore::new();
        store.insert_item(StockItemId::new(18), 1000);
        store.insert_item(StockItemId::new(26), 500);
        store.insert_receipt(PurchaseOrderId::new(12), StockItemId::new(18), 0);
        store.insert_receipt(PurchaseOrderId::new(12), StockItemId::new(26), 0);
        store
    }

    #[tokio::test]
    async fn applies_the_receiving_fix() {
        let store = seeded_store();
        let batch = CorrectionBatch::receiving_fix();

        let outcome = apply_batch(&store, &batch).await.expect("outcome");

        assert_eq!(
            outcome.new_stock,
            vec![("pregabalin".to_string(), 3500), ("winam".to_string(), 1500)]
        );
        assert_eq!(
            store.current_stock(StockItemId::new(18)).await.unwrap(),
            Some(3500)
        );
        assert_eq!(
            store.current_stock(StockItemId::new(26)).await.unwrap(),
            Some(1500)
        );
        assert_eq!(
            store.receipt(PurchaseOrderId::new(12), StockItemId::new(18)),
            Some(2500)
        );
        assert_eq!(
            store.receipt(PurchaseOrderId::new(12), StockItemId::new(26)),
            Some(1000)
        );

        // Stock writes first, then receipts, in batch order.
        assert_eq!(outcome.committed.len(), 4);
        assert!(matches!(
            outcome.committed[0],
            CommittedStep::StockAdjusted { previous: 1000, new_stock: 3500, .. }
        ));
        assert!(matches!(
            outcome.committed[2],
            CommittedStep::ReceiptOverwritten { received_quantity: 2500, .. }
        ));

        let audit = store.corrections().await.unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].reference, "po-12-receiving-fix");
        assert_eq!(audit[0].steps, outcome.committed);
    }

    #[tokio::test]
    async fn missing_row_reads_as_zero() {
        let store = InMemoryStockStore::new();
        let batch = CorrectionBatch::receiving_fix();

        let outcome = apply_batch(&store, &batch).await.expect("outcome");

        assert_eq!(
            outcome.new_stock,
            vec![("pregabalin".to_string(), 2500), ("winam".to_string(), 1000)]
        );
    }

    #[tokio::test]
    async fn negative_result_fails_before_the_write() {
        let store = InMemoryStockStore::new();
        store.insert_item(StockItemId::new(18), 10);

        let batch = CorrectionBatch::new(
            "overdraw",
            vec![StockCorrection {
                label: "pregabalin".to_string(),
                item_id: StockItemId::new(18),
                delta: -20,
                purchase_order_id: PurchaseOrderId::new(12),
                received_quantity: 0,
            }],
        );

        let failure = apply_batch(&store, &batch).await.unwrap_err();

        assert!(matches!(
            failure.error,
            CorrectionError::NegativeStock { current: 10, delta: -20, .. }
        ));
        assert!(failure.committed.is_empty());
        assert_eq!(
            store.current_stock(StockItemId::new(18)).await.unwrap(),
            Some(10)
        );
    }

    /// Delegates to an inner store but refuses all receipt writes.
    struct RefusingReceipts {
        inner: InMemoryStockStore,
    }

    #[async_trait]
    impl StockStore for RefusingReceipts {
        async fn current_stock(&self, item: StockItemId) -> Result<Option<i64>, StoreError> {
            self.inner.current_stock(item).await
        }

        async fn set_current_stock(
            &self,
            item: StockItemId,
            quantity: i64,
        ) -> Result<(), StoreError> {
            self.inner.set_current_stock(item, quantity).await
        }

        async fn set_received_quantity(
            &self,
            _order: PurchaseOrderId,
            _item: StockItemId,
            _quantity: i64,
        ) -> Result<(), StoreError> {
            Err(StoreError::Query("receipt write refused".to_string()))
        }

        async fn record_correction(&self, record: AppliedCorrection) -> Result<(), StoreError> {
            self.inner.record_correction(record).await
        }

        async fn corrections(&self) -> Result<Vec<AppliedCorrection>, StoreError> {
            self.inner.corrections().await
        }
    }

    #[tokio::test]
    async fn partial_failure_keeps_committed_mutations() {
        let store = RefusingReceipts {
            inner: seeded_store(),
        };
        let batch = CorrectionBatch::receiving_fix();

        let failure = apply_batch(&store, &batch).await.unwrap_err();

        // The third statement failed; the two stock writes stay committed.
        assert_eq!(
            failure.error,
            CorrectionError::Store(StoreError::Query("receipt write refused".to_string()))
        );
        assert_eq!(failure.committed.len(), 2);
        assert!(
            failure
                .committed
                .iter()
                .all(|s| matches!(s, CommittedStep::StockAdjusted { .. }))
        );
        assert_eq!(
            store.inner.current_stock(StockItemId::new(18)).await.unwrap(),
            Some(3500)
        );
        assert_eq!(
            store.inner.current_stock(StockItemId::new(26)).await.unwrap(),
            Some(1500)
        );
        assert_eq!(
            store
                .inner
                .receipt(PurchaseOrderId::new(12), StockItemId::new(18)),
            Some(0)
        );

        // Nothing lands in the audit trail for a failed run.
        assert!(store.inner.corrections().await.unwrap().is_empty());
    }
}
