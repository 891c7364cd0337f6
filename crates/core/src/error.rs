//! Store error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
///
/// Schema failures never reach the store; they are reported by
/// [`crate::validation`] before any store call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Create was attempted with an id that is already present.
    #[error("Item with this ID already exists")]
    DuplicateKey(ItemId),

    /// The targeted id is not present.
    #[error("Item not found")]
    NotFound(ItemId),
}

impl StoreError {
    pub fn duplicate(id: ItemId) -> Self {
        Self::DuplicateKey(id)
    }

    pub fn not_found(id: ItemId) -> Self {
        Self::NotFound(id)
    }

    /// The id the failing operation targeted.
    pub fn item_id(&self) -> ItemId {
        match self {
            Self::DuplicateKey(id) | Self::NotFound(id) => *id,
        }
    }
}
