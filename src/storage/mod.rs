//! Persistent key-value storage capability.
//!
//! This module provides:
//!
//! - [`Storage`]: the `get`/`set`/`remove` capability the theme controller uses
//! - [`MemoryStorage`]: an in-process store for tests and headless use
//! - [`FileStorage`]: a JSON file store used by the command line front-end
//! - [`UnavailableStorage`]: a store that fails every call, like a browser
//!   with storage disabled
//! - [`StorageError`]: what a backend reports when a call fails
//!
//! All operations are synchronous and may fail. Callers in this crate treat
//! failures as non-fatal.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::{MemoryStorage, UnavailableStorage};

use std::rc::Rc;

/// A synchronous string key-value store.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` when unset.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: Storage + ?Sized> Storage for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
