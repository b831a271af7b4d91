//! Tree builder: chunk, hash, store, and combine into a Merkle root.

use crate::chunker;
use crate::error::DagError;
use crate::node::{DirNode, FileNode, Node};
use crate::object::{self, Link, Object, ObjectKind};
use crate::pool::HashPool;
use crate::store::KVStore;
use crate::types::{Hash, DEFAULT_CHUNK_SIZE};
use tracing::{debug, instrument, trace};

/// Builds content-addressed DAGs from in-memory node trees.
///
/// The only policy knob is the chunk size; everything else (digest, link
/// encoding, combination rule) is fixed so that builder and reader always
/// agree on the persisted layout.
#[derive(Debug, Clone)]
pub struct DagBuilder {
    chunk_size: usize,
}

impl Default for DagBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DagBuilder {
    /// Create a builder with the default chunk size (1024 bytes).
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk size. Validated on `add`.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Add a node tree to the store and return its Merkle root hash.
    ///
    /// Writes one store entry per chunk and one per object. A store failure
    /// aborts the whole call; chunks already written stay behind as
    /// harmless, content-addressed orphans.
    #[instrument(skip_all, fields(node = node.name(), size = node.size()))]
    pub fn add(
        &self,
        store: &dyn KVStore,
        node: &Node,
        pool: &HashPool,
    ) -> Result<Hash, DagError> {
        if self.chunk_size == 0 {
            return Err(DagError::InvalidChunkSize);
        }
        let root = self.add_node(store, node, pool)?;
        debug!(root = %hex::encode(root), "Added tree");
        Ok(root)
    }

    fn add_node(
        &self,
        store: &dyn KVStore,
        node: &Node,
        pool: &HashPool,
    ) -> Result<Hash, DagError> {
        match node {
            Node::File(file) => self.add_file(store, file, pool),
            Node::Dir(dir) => self.add_dir(store, dir, pool),
        }
    }

    /// Chunk a file, store every chunk under its digest, and combine the
    /// chunk digests into the file's root.
    fn add_file(
        &self,
        store: &dyn KVStore,
        file: &FileNode,
        pool: &HashPool,
    ) -> Result<Hash, DagError> {
        let chunks = chunker::split(file.bytes(), self.chunk_size)?;
        if chunks.is_empty() {
            return Err(DagError::EmptyNode);
        }

        // Sibling chunks have no data dependency; hash them as one batch.
        let digests = pool.compute_batch(&chunks)?;
        for (chunk, digest) in chunks.iter().zip(&digests) {
            store.put(&object::chunk_key(digest), chunk)?;
        }
        trace!(name = file.name(), chunks = chunks.len(), "Stored file chunks");

        let root = merkle_root(digests.clone(), pool)?;

        // Single-chunk files inline their content; the root hash is the
        // chunk digest, so the object must live under a prefixed key.
        let object = if chunks.len() == 1 {
            Object {
                kind: ObjectKind::File,
                links: Vec::new(),
                data: Some(file.bytes().to_vec()),
            }
        } else {
            Object {
                kind: ObjectKind::File,
                links: chunks
                    .iter()
                    .zip(&digests)
                    .map(|(chunk, digest)| Link {
                        name: String::new(),
                        hash: *digest,
                        size: chunk.len() as u64,
                    })
                    .collect(),
                data: None,
            }
        };
        store.put(&object::object_key(&root), &object.encode()?)?;

        Ok(root)
    }

    /// Recurse into children, link each child's root, and combine the link
    /// digests into the directory's root.
    fn add_dir(
        &self,
        store: &dyn KVStore,
        dir: &DirNode,
        pool: &HashPool,
    ) -> Result<Hash, DagError> {
        let mut links = Vec::with_capacity(dir.len());
        for child in dir.iter() {
            let child_root = self.add_node(store, child, pool)?;
            links.push(Link {
                name: child.name().to_string(),
                hash: child_root,
                size: child.size(),
            });
        }
        if links.is_empty() {
            return Err(DagError::EmptyNode);
        }

        // Hashing the encoded link, not just the child root, makes the
        // directory hash depend on the full (name, hash, size) triple.
        let mut leaves = Vec::with_capacity(links.len());
        for link in &links {
            leaves.push(pool.compute(&link.encode()?)?);
        }
        let root = merkle_root(leaves, pool)?;

        let object = Object {
            kind: ObjectKind::Dir,
            links,
            data: None,
        };
        store.put(&object::object_key(&root), &object.encode()?)?;
        trace!(name = dir.name(), children = dir.len(), root = %hex::encode(root), "Stored directory");

        Ok(root)
    }
}

/// Collapse a level of digests into a single Merkle root.
///
/// Standard pairwise combination: when a level has an odd count the last
/// digest is duplicated, then adjacent pairs are concatenated and digested
/// until one hash remains. A single input digest is already the root.
pub(crate) fn merkle_root(mut level: Vec<Hash>, pool: &HashPool) -> Result<Hash, DagError> {
    if level.is_empty() {
        return Err(DagError::EmptyNode);
    }
    while level.len() > 1 {
        if level.len() % 2 != 0 {
            let last = level[level.len() - 1];
            level.push(last);
        }
        let pairs: Vec<Vec<u8>> = level
            .chunks(2)
            .map(|pair| {
                let mut combined = Vec::with_capacity(64);
                combined.extend_from_slice(&pair[0]);
                combined.extend_from_slice(&pair[1]);
                combined
            })
            .collect();
        let refs: Vec<&[u8]> = pairs.iter().map(|p| p.as_slice()).collect();
        level = pool.compute_batch(&refs)?;
    }
    Ok(level[0])
}
