//! # Storage Slot
//!
//! Key-value persistence behind the cart. The cart uses exactly one key and
//! always overwrites it wholesale.
//!
//! Implementations:
//! - [`MemoryStorage`]: in-process map (tests, server-side rendering)
//! - `FileStorage` in `cart-cli`: one JSON file per key
//! - `LocalStorage` in `cart-wasm`: `window.localStorage`

use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend not reachable (storage disabled, private browsing, missing dir)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the write because it is full
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// Any other backend failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A durable key-value store holding the cart snapshot.
pub trait CartStorage {
    /// Read the value under `key`, `None` if never written
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a value, as if written by a previous session
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new().with_entry("seeded", "[]");
        assert_eq!(storage.read("seeded").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.read("missing").unwrap(), None);

        storage.write("k", "v1").unwrap();
        storage.write("k", "v2").unwrap();
        assert_eq!(storage.get("k"), Some("v2"));
        assert_eq!(storage.write_count(), 2);

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k"), None);
    }
}
