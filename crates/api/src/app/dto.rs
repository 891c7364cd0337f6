use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::Response,
};
use serde::Serialize;

use itemstore_core::{validate_item_bytes, FieldError, Item, ItemId, ValidationReport};

use crate::app::errors;

// -------------------------
// Request extraction
// -------------------------

/// An item body that passed validation.
///
/// Rejects with a 422 validation report, never with axum's plain-text
/// JSON rejection.
#[derive(Debug)]
pub struct ValidatedItem(pub Item);

#[axum::async_trait]
impl<S> FromRequest<S> for ValidatedItem
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(axum::response::IntoResponse::into_response)?;
        validate_item_bytes(&body)
            .map(ValidatedItem)
            .map_err(|report| {
                tracing::debug!(errors = report.errors.len(), "item payload rejected");
                errors::validation_error(report)
            })
    }
}

/// Parse the `{id}` path segment.
pub fn parse_item_id(raw: &str) -> Result<ItemId, Response> {
    path_item_id(raw).map_err(errors::validation_error)
}

/// Validate a path id and an item body together.
///
/// Both are always checked; path errors come first in the report.
pub fn parse_item_update(raw_id: &str, body: &[u8]) -> Result<(ItemId, Item), Response> {
    match (path_item_id(raw_id), validate_item_bytes(body)) {
        (Ok(id), Ok(item)) => Ok((id, item)),
        (Err(path), Err(body)) => Err(errors::validation_error(path.merge(body))),
        (Err(report), Ok(_)) | (Ok(_), Err(report)) => Err(errors::validation_error(report)),
    }
}

fn path_item_id(raw: &str) -> Result<ItemId, ValidationReport> {
    raw.parse().map_err(|_| {
        ValidationReport::single(FieldError::new(
            &["path", "item_id"],
            "Input should be a valid integer, unable to parse string as an integer",
            "int_parsing",
        ))
    })
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub const ITEM_DELETED: MessageResponse = MessageResponse {
    message: "Item deleted successfully",
};
