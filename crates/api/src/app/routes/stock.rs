use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::{HeaderMap, Method, StatusCode, header},
    response::IntoResponse,
    routing::{any, get},
};
use serde_json::json;

use pharmacore_auth::parse_bearer;
use pharmacore_inventory::{CorrectionBatch, StockItemId};
use pharmacore_store::apply_batch;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/corrections", any(apply_corrections))
        .route("/corrections/history", get(correction_history))
        .route("/items/:id", get(get_item))
        .route("/opening-snapshot", any(capture_opening_snapshot))
}

/// Apply a correction batch: the built-in receiving fix when the body is
/// empty, otherwise the batch supplied as JSON.
///
/// Any method is accepted; OPTIONS answers cross-origin negotiation with an
/// empty success.
pub async fn apply_corrections(
    Extension(services): Extension<AppServices>,
    method: Method,
    body: Bytes,
) -> axum::response::Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let batch = if body.is_empty() {
        CorrectionBatch::receiving_fix()
    } else {
        match serde_json::from_slice::<CorrectionBatch>(&body) {
            Ok(batch) => batch,
            Err(e) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.to_string());
            }
        }
    };

    if let Err(e) = batch.validate() {
        return errors::domain_error_to_response(e);
    }

    tracing::info!(reference = %batch.reference, entries = batch.entries.len(), "applying stock correction");

    let outcome = match apply_batch(services.stock.as_ref(), &batch).await {
        Ok(outcome) => outcome,
        Err(failure) => return errors::correction_failure_to_response(failure),
    };

    (StatusCode::OK, Json(dto::outcome_to_json(&outcome))).into_response()
}

pub async fn correction_history(
    Extension(services): Extension<AppServices>,
) -> axum::response::Response {
    match services.stock.corrections().await {
        Ok(items) => (StatusCode::OK, Json(json!({ "items": items }))).into_response(),
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string()),
    }
}

pub async fn get_item(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item: StockItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    match services.stock.current_stock(item).await {
        Ok(Some(quantity)) => {
            (StatusCode::OK, Json(dto::stock_item_to_json(item, quantity))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "stock item not found"),
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string()),
    }
}

/// Capture the opening-stock snapshot for the next accounting period.
///
/// The bearer credential is verified at the caller's own privilege level;
/// only the snapshot procedure itself runs on the elevated handle.
pub async fn capture_opening_snapshot(
    Extension(services): Extension<AppServices>,
    method: Method,
    headers: HeaderMap,
) -> axum::response::Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Authorization required" })),
        )
            .into_response();
    };

    let Some(token) = parse_bearer(auth_header) else {
        return forbidden();
    };

    let user = match services.sessions.verify(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "opening snapshot: session rejected");
            return forbidden();
        }
    };

    tracing::info!(user = %user.user_id, "capturing opening stock snapshot");

    if let Err(e) = services.snapshot.capture().await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Opening stock snapshot captured successfully",
        })),
    )
        .into_response()
}

fn forbidden() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "success": false, "error": "Unauthorized: invalid or expired token" })),
    )
        .into_response()
}
