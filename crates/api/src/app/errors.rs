use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use itemstore_core::{StoreError, ValidationReport};

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::debug!(item_id = %err.item_id(), error = %err, "store rejected request");
    match err {
        StoreError::DuplicateKey(_) => json_error(StatusCode::BAD_REQUEST, "duplicate_key", err.to_string()),
        StoreError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
    }
}

pub fn validation_error(report: ValidationReport) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "message": "request validation failed",
            "detail": report,
        })),
    )
        .into_response()
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
