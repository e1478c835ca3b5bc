//! In-memory state storage using DashMap

use std::sync::Arc;
use std::sync::OnceLock;

use dashmap::DashMap;

use super::StateStorage;
use crate::error::StorageError;

static SESSION: OnceLock<Arc<MemoryStorage>> = OnceLock::new();

/// Key-value storage backed by a concurrent hash map.
///
/// State lives as long as the process. [`MemoryStorage::session`] returns the
/// process-wide instance behind the `session` storage kind.
///
/// # Example
///
/// ```
/// use gridstate_lib::state::{MemoryStorage, StateStorage};
///
/// let storage = MemoryStorage::new();
/// storage.set_item("orders", "{}").unwrap();
/// assert_eq!(storage.get_item("orders").unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: DashMap<String, String>,
}

impl MemoryStorage {
    /// Creates a new empty storage.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the process-wide session storage.
    pub fn session() -> Arc<MemoryStorage> {
        SESSION.get_or_init(|| Arc::new(MemoryStorage::new())).clone()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl StateStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a").unwrap(), None);
        storage.set_item("a", "1").unwrap();
        storage.set_item("a", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.len(), 1);
        storage.remove_item("a").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_session_is_shared() {
        MemoryStorage::session()
            .set_item("memory-test-session", "x")
            .unwrap();
        let value = MemoryStorage::session().get_item("memory-test-session").unwrap();
        assert_eq!(value.as_deref(), Some("x"));
    }
}
