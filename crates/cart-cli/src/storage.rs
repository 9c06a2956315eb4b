//! # File Storage
//!
//! One file per key under a data directory (`<dir>/<key>.json`). Writes go
//! through a temporary file and a rename so a crash never leaves a
//! half-written snapshot behind.

use cart_core::{CartStorage, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Directory-backed storage slot
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Backend(format!("invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn io_error(err: std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::PermissionDenied => StorageError::Unavailable(err.to_string()),
        _ => StorageError::Backend(err.to_string()),
    }
}

impl CartStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_error)?;
        fs::rename(&tmp, &path).map_err(io_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::{CartStore, Currency, Price, Product};

    #[test]
    fn test_read_write_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read("tara_cart").unwrap(), None);

        storage.write("tara_cart", "[]").unwrap();
        assert_eq!(storage.read("tara_cart").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/tara_cart.json").exists());
        assert!(!dir.path().join("nested/tara_cart.json.tmp").exists());

        storage.remove("tara_cart").unwrap();
        storage.remove("tara_cart").unwrap();
        assert_eq!(storage.read("tara_cart").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(storage.write("../escape", "x").is_err());
        assert!(storage.write("", "x").is_err());
        assert!(storage.read(".hidden").is_err());
    }

    #[test]
    fn test_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let soap = Product::new("soap", "Soap", Price::new(8.0, Currency::CAD));

        let mut store = CartStore::new(FileStorage::new(dir.path()));
        store.add_item(&soap).unwrap();
        store.add_item(&soap).unwrap();

        let reopened = CartStore::new(FileStorage::new(dir.path()));
        assert_eq!(reopened.count(), 2);
        assert_eq!(reopened.total().amount, 1600);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tara_cart.json"), "{ broken").unwrap();
        let store = CartStore::new(FileStorage::new(dir.path()));
        assert!(store.is_empty());
    }
}
