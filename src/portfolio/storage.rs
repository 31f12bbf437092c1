//! Key-value blob stores backing the portfolio
//!
//! The portfolio is written as one opaque text blob under a fixed key. Stores
//! only move strings around; parsing happens in [`super::PortfolioStore`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Minimal get/set interface over named blobs
pub trait BlobStore {
    /// Fetch a blob, `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a blob in full
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store, mostly for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per blob inside a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Stage then rename; readers only ever see a complete blob
        let target = self.path_for(key);
        let staging = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&staging, value).map_err(io_err)?;
        fs::rename(&staging, &target).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryBlobStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "[1,2]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("fund_calc_blob_{}", std::process::id()));
        let mut store = FileBlobStore::new(&dir);
        assert!(store.get("portfolio").unwrap().is_none());

        store.set("portfolio", "[]").unwrap();
        store.set("portfolio", "[{}]").unwrap();
        assert_eq!(store.get("portfolio").unwrap().as_deref(), Some("[{}]"));
        assert!(!dir.join("portfolio.json.tmp").exists());

        fs::remove_dir_all(&dir).ok();
    }
}
