//! Error types for DAG construction, retrieval, and storage.

use thiserror::Error;

/// Failures surfaced by the key-value store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Failures surfaced by DAG construction and retrieval.
///
/// None of these are recovered locally; a failed `add` may leave orphaned
/// chunks behind, which content-addressing makes harmless.
#[derive(Debug, Error)]
pub enum DagError {
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("node has no chunks or children to hash")]
    EmptyNode,

    #[error("stored object has an unsupported node type")]
    UnsupportedNodeType,

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    #[error("no object found for hash {0}")]
    NotFound(String),

    #[error("file is incomplete: chunk {0} could not be read")]
    IncompleteFile(String),

    #[error("path segment not found: {0}")]
    PathNotFound(String),

    #[error("hash pool is closed")]
    PoolClosed,
}

impl DagError {
    /// NotFound carrying the hex form of the missing hash.
    pub fn not_found(hash: &crate::types::Hash) -> Self {
        DagError::NotFound(hex::encode(hash))
    }

    /// IncompleteFile carrying the hex form of the unreadable chunk hash.
    pub fn incomplete_file(hash: &crate::types::Hash) -> Self {
        DagError::IncompleteFile(hex::encode(hash))
    }
}
