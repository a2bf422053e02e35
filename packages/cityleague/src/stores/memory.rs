//! In-memory detail cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::traits::store::DetailCache;
use crate::types::detail::EventDetail;

/// In-memory store for event details, keyed by detail URL.
///
/// Lives for the process lifetime; nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    details: RwLock<HashMap<String, EventDetail>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored details.
    pub fn clear(&self) {
        self.details.write().unwrap().clear();
    }

    /// Number of stored details.
    pub fn len(&self) -> usize {
        self.details.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DetailCache for MemoryStore {
    async fn get(&self, url: &str) -> Option<EventDetail> {
        self.details.read().unwrap().get(url).cloned()
    }

    async fn put(&self, url: &str, detail: EventDetail) {
        self.details.write().unwrap().insert(url.to_string(), detail);
    }
}
