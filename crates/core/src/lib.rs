//! `itemstore-core` — domain building blocks for the item store.
//!
//! This crate contains **pure domain** types (no IO, no HTTP, no storage):
//! the `Item` record, its identifier, the store error model and the payload
//! validation that runs before anything touches the store.

pub mod entity;
pub mod error;
pub mod id;
pub mod item;
pub mod validation;

pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use id::ItemId;
pub use item::Item;
pub use validation::{validate_item, validate_item_bytes, FieldError, ValidationReport};
