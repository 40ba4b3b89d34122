//! In-process stores.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::KeyValueStore;
use crate::error::StorageError;

/// Store kept entirely in memory; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Store that behaves like disabled browser storage: every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_removes() {
        let store = MemoryStore::default();
        assert_eq!(store.get("k").expect("get"), None);
        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
        store.remove("k").expect("remove");
        assert_eq!(store.get("k").expect("get"), None);
    }

    #[test]
    fn unavailable_store_reports_errors() {
        let err = UnavailableStore.set("k", "v").expect_err("should fail");
        assert!(err.to_string().contains("storage unavailable"));
    }
}
