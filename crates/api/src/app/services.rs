use std::sync::Arc;

use itemstore_infra::{InMemoryItemStore, ItemStore};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppServices {
    pub items: Arc<dyn ItemStore>,
}

impl AppServices {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryItemStore::new()))
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("items", &self.items.len())
            .finish()
    }
}
