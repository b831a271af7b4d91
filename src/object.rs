//! Persisted DAG node representation and key derivation.
//!
//! Objects and chunks share one keyspace in the store. Chunks are keyed by
//! their raw content digest; objects are keyed by `obj:` + root hash. The
//! prefix keeps a single-chunk file, whose root hash equals its chunk
//! digest, from colliding with its own object entry.

use crate::error::{DagError, StoreError};
use crate::types::Hash;
use serde::{Deserialize, Serialize};

/// Key prefix separating object entries from raw chunk entries.
const OBJECT_KEY_PREFIX: &[u8] = b"obj:";

/// Discriminator persisted on every object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    File,
    Dir,
}

/// A directory's persisted reference to a child, or a file's reference to
/// one of its chunks (empty name).
///
/// The bincode encoding of a `Link` is the exact byte sequence hashed when
/// computing a directory's Merkle leaves, so a directory hash depends on
/// precisely the ordered (name, child-hash, child-size) triples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub hash: Hash,
    pub size: u64,
}

/// The persisted form of a Merkle node.
///
/// Files that fit in one chunk inline their content in `data` with no
/// links; larger files carry one link per chunk and no inline data.
/// Directories carry one link per child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub kind: ObjectKind,
    pub links: Vec<Link>,
    pub data: Option<Vec<u8>>,
}

impl Link {
    /// Deterministic byte encoding used as a directory Merkle leaf.
    pub fn encode(&self) -> Result<Vec<u8>, DagError> {
        bincode::serialize(self)
            .map_err(|e| StoreError::Backend(format!("failed to encode link: {}", e)).into())
    }
}

impl Object {
    pub fn encode(&self) -> Result<Vec<u8>, DagError> {
        bincode::serialize(self)
            .map_err(|e| StoreError::Backend(format!("failed to encode object: {}", e)).into())
    }

    /// Decode a stored object value.
    ///
    /// A value that does not parse (unknown kind tag, truncated bytes) is
    /// reported as `UnsupportedNodeType`: the hash resolved to something
    /// this implementation does not recognize as a node.
    pub fn decode(bytes: &[u8]) -> Result<Object, DagError> {
        bincode::deserialize(bytes).map_err(|_| DagError::UnsupportedNodeType)
    }
}

/// Store key for the object persisted under `hash`.
pub fn object_key(hash: &Hash) -> Vec<u8> {
    let mut key = Vec::with_capacity(OBJECT_KEY_PREFIX.len() + hash.len());
    key.extend_from_slice(OBJECT_KEY_PREFIX);
    key.extend_from_slice(hash);
    key
}

/// Store key for a raw chunk: the chunk's own digest.
pub fn chunk_key(hash: &Hash) -> Vec<u8> {
    hash.to_vec()
}
