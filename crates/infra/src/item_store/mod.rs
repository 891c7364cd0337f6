//! Item storage boundary.
//!
//! The HTTP layer only sees the [`ItemStore`] trait; the process-memory
//! backend is the one implementation shipped.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryItemStore;
pub use r#trait::ItemStore;
