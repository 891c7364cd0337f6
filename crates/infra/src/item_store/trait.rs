use std::sync::Arc;

use itemstore_core::{Item, ItemId, StoreResult};

/// CRUD boundary over a collection of items keyed by [`ItemId`].
///
/// Implementations must make each call atomic: a failing call leaves the
/// collection exactly as it was, and two concurrent calls never both pass
/// the same existence check.
pub trait ItemStore: Send + Sync {
    /// Insert a new item. Fails with `DuplicateKey` if the id is taken.
    fn create(&self, item: Item) -> StoreResult<Item>;

    /// Every item currently stored, in insertion order.
    fn list_all(&self) -> Vec<Item>;

    fn get_by_id(&self, id: ItemId) -> StoreResult<Item>;

    /// Replace the whole record stored under `id` with `item`.
    ///
    /// `item.id` is kept as supplied, so an update may re-key a record.
    fn update(&self, id: ItemId, item: Item) -> StoreResult<Item>;

    fn delete(&self, id: ItemId) -> StoreResult<()>;

    fn len(&self) -> usize {
        self.list_all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn create(&self, item: Item) -> StoreResult<Item> {
        (**self).create(item)
    }

    fn list_all(&self) -> Vec<Item> {
        (**self).list_all()
    }

    fn get_by_id(&self, id: ItemId) -> StoreResult<Item> {
        (**self).get_by_id(id)
    }

    fn update(&self, id: ItemId, item: Item) -> StoreResult<Item> {
        (**self).update(id, item)
    }

    fn delete(&self, id: ItemId) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
