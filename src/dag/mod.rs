//! Merkle DAG construction and traversal
//!
//! The builder turns an in-memory node tree into content-addressed objects
//! and chunks in the store; the reader walks those objects back down from a
//! root hash to reassemble file bytes.

pub mod builder;
pub mod reader;
