use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pharmacore_core::DomainError;
use pharmacore_store::{CorrectionError, CorrectionFailure};

/// Correction failures surface the store's message verbatim plus the ledger
/// of steps that had already committed (nothing is rolled back).
pub fn correction_failure_to_response(failure: CorrectionFailure) -> axum::response::Response {
    let status = match &failure.error {
        CorrectionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CorrectionError::NegativeStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };

    (
        status,
        axum::Json(json!({
            "error": failure.error.to_string(),
            "steps_committed": failure.committed,
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
