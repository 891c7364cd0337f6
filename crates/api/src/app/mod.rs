//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: the store handle shared by every handler
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request extraction/validation and response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use itemstore_infra::ItemStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router backed by a fresh in-memory store.
pub fn build_app() -> Router {
    build_app_with_services(services::AppServices::in_memory())
}

/// Build the router around an existing store (tests inject their own).
pub fn build_app_with_store(store: Arc<dyn ItemStore>) -> Router {
    build_app_with_services(services::AppServices::new(store))
}

fn build_app_with_services(services: services::AppServices) -> Router {
    routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_logging)))
}
