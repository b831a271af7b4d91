//! Retriever: walk a stored DAG from a root hash down a path to file bytes.

use crate::error::DagError;
use crate::object::{self, Object, ObjectKind};
use crate::pool::HashPool;
use crate::store::KVStore;
use crate::types::Hash;
use tracing::{debug, instrument, trace};

/// Retrieve the exact bytes of the file named by `path` under `root`.
///
/// `path` is slash-separated; empty segments are skipped, so `""`, `"/"`
/// and `"a//b"` behave as expected. The walk is strictly read-only: any
/// failure leaves the store untouched and no partial bytes are returned.
#[instrument(skip_all, fields(root = %hex::encode(root), path))]
pub fn hash_to_file(
    store: &dyn KVStore,
    root: &Hash,
    path: &str,
    pool: &HashPool,
) -> Result<Vec<u8>, DagError> {
    let (hash, object) = resolve(store, root, path)?;
    let bytes = read_file(store, &hash, &object, path, pool)?;
    debug!(bytes = bytes.len(), "Retrieved file");
    Ok(bytes)
}

/// Walk the DAG from `root` down `path` and return the object it names,
/// along with the hash it is stored under.
pub fn resolve(store: &dyn KVStore, root: &Hash, path: &str) -> Result<(Hash, Object), DagError> {
    let mut current = *root;
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    loop {
        let value = store
            .get(&object::object_key(&current))?
            .ok_or_else(|| DagError::not_found(&current))?;
        let object = Object::decode(&value)?;

        let Some(segment) = segments.next() else {
            return Ok((current, object));
        };

        match object.kind {
            ObjectKind::Dir => {
                // First match wins; duplicate names are undefined behavior.
                let link = object
                    .links
                    .iter()
                    .find(|link| link.name == segment)
                    .ok_or_else(|| DagError::PathNotFound(segment.to_string()))?;
                trace!(segment, child = %hex::encode(link.hash), "Descending");
                current = link.hash;
            }
            // A file cannot be descended into.
            ObjectKind::File => return Err(DagError::PathNotFound(segment.to_string())),
        }
    }
}

/// Reassemble the file represented by `object`, stored under `hash`.
fn read_file(
    store: &dyn KVStore,
    hash: &Hash,
    object: &Object,
    path: &str,
    pool: &HashPool,
) -> Result<Vec<u8>, DagError> {
    if object.kind != ObjectKind::File {
        // The path resolved to a directory, not a file.
        return Err(DagError::PathNotFound(path.to_string()));
    }

    if let Some(data) = &object.data {
        // Inline content is a single chunk whose digest is the root itself.
        if pool.compute(data)? != *hash {
            return Err(DagError::incomplete_file(hash));
        }
        return Ok(data.clone());
    }

    if object.links.is_empty() {
        // The builder never writes a file object with neither data nor
        // links; whatever this is, it is not one of ours.
        return Err(DagError::UnsupportedNodeType);
    }

    let mut bytes = Vec::with_capacity(object.links.iter().map(|l| l.size as usize).sum());
    for link in &object.links {
        let chunk = store
            .get(&object::chunk_key(&link.hash))?
            .ok_or_else(|| DagError::incomplete_file(&link.hash))?;
        // Content-addressing makes every chunk verifiable on read.
        if pool.compute(&chunk)? != link.hash {
            return Err(DagError::incomplete_file(&link.hash));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
