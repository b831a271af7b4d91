//! Merkledag: Content-Addressed Merkle DAG
//!
//! Builds a content-addressed Merkle DAG over an opaque key-value store:
//! files are split into fixed-size chunks, every chunk and intermediate node
//! is hashed, and a whole file/directory tree collapses to a single root
//! hash. Given that root hash (and a slash-separated path), the original
//! bytes can be retrieved back out of the store.

pub mod chunker;
pub mod cli;
pub mod dag;
pub mod error;
pub mod logging;
pub mod node;
pub mod object;
pub mod pool;
pub mod store;
pub mod types;

pub use dag::builder::DagBuilder;
pub use dag::reader::hash_to_file;
pub use error::{DagError, StoreError};
pub use node::{DirNode, FileNode, Node, NodeKind};
pub use pool::{HashPool, PoolConfig};
pub use store::{KVStore, MemoryStore};
pub use types::{Hash, DEFAULT_CHUNK_SIZE};

/// Add a node tree to the store with the default chunk size and return its
/// Merkle root hash.
pub fn add(store: &dyn store::KVStore, node: &Node, pool: &HashPool) -> Result<Hash, DagError> {
    DagBuilder::new().add(store, node, pool)
}
