//! Data-driven stock corrections.
//!
//! A correction reconciles a stock item's on-hand quantity with the receipts
//! recorded against a purchase order: the on-hand quantity moves by `delta`,
//! and the purchase-order line's received quantity is overwritten with the
//! cumulative quantity actually received.

use serde::{Deserialize, Serialize};

use pharmacore_core::{DomainError, DomainResult};

use crate::{PurchaseOrderId, StockItemId};

/// One correction entry: adjust a stock item and reconcile the matching
/// purchase-order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCorrection {
    /// Short item name used in summaries and response fields.
    pub label: String,

    pub item_id: StockItemId,

    /// Signed adjustment applied to the current on-hand quantity.
    pub delta: i64,

    pub purchase_order_id: PurchaseOrderId,

    /// Cumulative quantity actually received; overwrites the line item.
    pub received_quantity: i64,
}

/// A named, replayable list of corrections.
///
/// A batch is applied as a fixed sequence of independent store mutations; the
/// reference names the repair in summaries and in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionBatch {
    pub reference: String,
    pub entries: Vec<StockCorrection>,
}

impl CorrectionBatch {
    pub fn new(reference: impl Into<String>, entries: Vec<StockCorrection>) -> Self {
        Self {
            reference: reference.into(),
            entries,
        }
    }

    /// The known receiving discrepancy this service was first built to
    /// repair: purchase order 12 was received into stock without its
    /// received quantities being recorded.
    pub fn receiving_fix() -> Self {
        let order = PurchaseOrderId::new(12);
        Self::new(
            "po-12-receiving-fix",
            vec![
                StockCorrection {
                    label: "pregabalin".to_string(),
                    item_id: StockItemId::new(18),
                    delta: 2500,
                    purchase_order_id: order,
                    received_quantity: 2500,
                },
                StockCorrection {
                    label: "winam".to_string(),
                    item_id: StockItemId::new(26),
                    delta: 1000,
                    purchase_order_id: order,
                    received_quantity: 1000,
                },
            ],
        )
    }

    /// Validate the batch before any store mutation happens.
    ///
    /// Labels become response field names, so they must be non-blank and
    /// unique within the batch.
    pub fn validate(&self) -> DomainResult<()> {
        if self.reference.trim().is_empty() {
            return Err(DomainError::validation("reference cannot be empty"));
        }
        if self.entries.is_empty() {
            return Err(DomainError::validation("batch has no entries"));
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            if entry.label.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "entry for item {} has an empty label",
                    entry.item_id
                )));
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate label '{}'",
                    entry.label
                )));
            }
            if entry.received_quantity < 0 {
                return Err(DomainError::validation(format!(
                    "received quantity for '{}' cannot be negative",
                    entry.label
                )));
            }
        }

        Ok(())
    }
}
