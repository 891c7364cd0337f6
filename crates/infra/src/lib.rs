//! Infrastructure layer: storage backends for items.

pub mod item_store;

pub use item_store::{InMemoryItemStore, ItemStore};
