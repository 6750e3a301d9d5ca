//! In-process storage backends.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{Storage, StorageError};

/// A store kept in memory for the lifetime of the value.
///
/// [`MemoryStorage::set_failing`] flips a working store into a broken one
/// halfway through a scenario, the way a browser can start throwing once its
/// quota is exhausted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Makes every subsequent call fail (or succeed again with `false`).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Returns whether `key` is present, bypassing the failing switch.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Returns the raw value under `key`, bypassing the failing switch.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            Err(StorageError::Unavailable("memory storage switched off".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// A store that rejects every call.
///
/// Stands in for browsers where storage access throws: private browsing,
/// sandboxed iframes, exhausted quota.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "dark").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("dark"));

        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
        assert!(!storage.contains("k"));
    }

    #[test]
    fn test_memory_storage_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("missing").is_ok());
    }

    #[test]
    fn test_memory_storage_failing_switch() {
        let storage = MemoryStorage::with_entry("k", "light");
        storage.set_failing(true);

        assert!(storage.get("k").is_err());
        assert!(storage.set("k", "dark").is_err());
        assert!(storage.remove("k").is_err());
        assert_eq!(storage.peek("k").as_deref(), Some("light"));

        storage.set_failing(false);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_unavailable_storage_always_fails() {
        let storage = UnavailableStorage;
        assert!(matches!(
            storage.get("k"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.set("k", "v").is_err());
        assert!(storage.remove("k").is_err());
    }

    #[test]
    fn test_storage_through_reference() {
        let storage = MemoryStorage::new();
        let by_ref: &dyn Storage = &storage;
        (&by_ref).set("k", "v").unwrap();
        assert_eq!(storage.peek("k").as_deref(), Some("v"));
    }
}
