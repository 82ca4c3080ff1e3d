//! In-memory record store
//!
//! BTreeMap-based store with RwLock for concurrency.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::Result;
use super::RecordStore;

/// Records held in memory, ordered by key
pub struct MemoryStore<V> {
    data: RwLock<BTreeMap<String, V>>,
}

impl<V> MemoryStore<V> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> RecordStore<V> for MemoryStore<V> {
    fn insert(&self, key: &str, value: V) -> Result<()> {
        self.data.write().insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<V> {
        self.data.read().get(key).cloned()
    }

    fn values(&self) -> Vec<V> {
        self.data.read().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}
