use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use itemstore_core::{Entity, Item, ItemId, StoreError, StoreResult};

use super::r#trait::ItemStore;

/// In-memory item store.
///
/// Records live in a `Vec` in insertion order and every by-id operation is a
/// linear scan. Each operation holds the lock for its whole scan-then-mutate
/// sequence.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing items. Later duplicates of an id are dropped.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        for item in items {
            if let Err(e) = store.create(item) {
                tracing::debug!(item_id = %e.item_id(), "seed item dropped: {e}");
            }
        }
        store
    }

    // Every mutation is a single Vec operation, so a poisoned lock still
    // guards a consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Item>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Item>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(items: &[Item], id: ItemId) -> Option<usize> {
        items.iter().position(|item| *item.id() == id)
    }
}

impl ItemStore for InMemoryItemStore {
    fn create(&self, item: Item) -> StoreResult<Item> {
        let mut items = self.write();
        let id = *item.id();
        if Self::position(&items, id).is_some() {
            tracing::debug!(item_id = %id, "create rejected: duplicate id");
            return Err(StoreError::duplicate(id));
        }
        items.push(item.clone());
        tracing::info!(item_id = %id, total = items.len(), "item created");
        Ok(item)
    }

    fn list_all(&self) -> Vec<Item> {
        self.read().clone()
    }

    fn get_by_id(&self, id: ItemId) -> StoreResult<Item> {
        let items = self.read();
        Self::position(&items, id)
            .map(|idx| items[idx].clone())
            .ok_or(StoreError::not_found(id))
    }

    fn update(&self, id: ItemId, item: Item) -> StoreResult<Item> {
        let mut items = self.write();
        let idx = Self::position(&items, id).ok_or(StoreError::not_found(id))?;

        let new_id = *item.id();
        if new_id != id {
            // Re-keying onto an id held by another record would break uniqueness.
            if Self::position(&items, new_id).is_some() {
                tracing::warn!(item_id = %id, body_id = %new_id, "update rejected: body id already in use");
                return Err(StoreError::duplicate(new_id));
            }
            tracing::warn!(item_id = %id, body_id = %new_id, "update re-keys item to body id");
        }

        items[idx] = item.clone();
        tracing::info!(item_id = %id, "item updated");
        Ok(item)
    }

    fn delete(&self, id: ItemId) -> StoreResult<()> {
        let mut items = self.write();
        let idx = Self::position(&items, id).ok_or(StoreError::not_found(id))?;
        items.remove(idx);
        tracing::info!(item_id = %id, total = items.len(), "item deleted");
        Ok(())
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
