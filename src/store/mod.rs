//! Key-Value Store boundary
//!
//! The DAG layer consumes storage through this narrow interface and assumes
//! nothing beyond read-your-writes. Durability and transactionality belong
//! to the backend.

pub mod sled;

pub use self::sled::SledStore;

use crate::error::StoreError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Opaque key-value store interface.
///
/// Keys and values are arbitrary byte strings. A missing key is `Ok(None)`,
/// not an error; the DAG layer decides what absence means.
pub trait KVStore: Send + Sync {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
}

/// In-memory store for tests and benchmarks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KVStore for MemoryStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }
}
