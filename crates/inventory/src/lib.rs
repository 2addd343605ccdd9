//! `pharmacore-inventory` — inventory domain model.
//!
//! Stock items, purchase-order line items, and the data-driven correction
//! records that reconcile the two.

pub mod correction;
pub mod item;

pub use correction::{CorrectionBatch, StockCorrection};
pub use item::{PurchaseOrderId, StockItemId};
