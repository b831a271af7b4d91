//! Sled-backed key-value store.

use crate::error::StoreError;
use crate::store::KVStore;
use std::path::Path;

/// Sled-based implementation of `KVStore`.
pub struct SledStore {
    db: ::sled::Db,
}

impl SledStore {
    /// Open (or create) a sled database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = ::sled::open(path)
            .map_err(|e| StoreError::Backend(format!("failed to open sled database: {}", e)))?;
        Ok(Self { db })
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::Backend(format!("failed to flush database: {}", e)))?;
        Ok(())
    }

    /// Check whether a key exists without reading its value.
    pub fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.db
            .contains_key(key)
            .map_err(|e| StoreError::Backend(format!("failed to check key: {}", e)))
    }
}

impl KVStore for SledStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db
            .insert(key, value)
            .map_err(|e| StoreError::Backend(format!("failed to put value: {}", e)))?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self
            .db
            .get(key)
            .map_err(|e| StoreError::Backend(format!("failed to get value: {}", e)))?;
        Ok(value.map(|ivec| ivec.to_vec()))
    }
}
