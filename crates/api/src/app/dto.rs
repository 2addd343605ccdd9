//! Response JSON mapping helpers.
//!
//! Correction batches are deserialized straight into the domain type; the
//! helpers here shape the outbound JSON.

use serde_json::{Map, Value, json};

use pharmacore_inventory::StockItemId;
use pharmacore_store::CorrectionOutcome;

/// Success body: `success`, `message`, `reference`, plus one
/// `<label>_new_stock` field per batch entry.
pub fn outcome_to_json(outcome: &CorrectionOutcome) -> Value {
    let summary = outcome
        .new_stock
        .iter()
        .map(|(label, quantity)| format!("{label} {quantity}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(
        "message".to_string(),
        json!(format!("Stock correction applied: {summary}")),
    );
    body.insert("reference".to_string(), json!(outcome.reference));
    for (label, quantity) in &outcome.new_stock {
        body.insert(format!("{label}_new_stock"), json!(quantity));
    }

    Value::Object(body)
}

pub fn stock_item_to_json(item: StockItemId, current_stock: i64) -> Value {
    json!({
        "item_id": item,
        "current_stock": current_stock,
    })
}
