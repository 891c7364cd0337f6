use axum::{routing::get, Router};

pub mod items;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(items::router())
        .fallback(system::not_found)
}
