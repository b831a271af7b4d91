//! Core type aliases and policy constants.

/// 32-byte BLAKE3 digest identifying a chunk or DAG node.
pub type Hash = [u8; 32];

/// Default maximum chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
