//! Bounded worker pool for digest computation.
//!
//! Hashing many chunks at once should neither serialize every caller behind
//! one hasher nor fan out an unbounded number of threads. The pool owns a
//! fixed set of worker threads fed from a shared job channel; only job
//! hand-off is serialized, the hashing itself runs in parallel.

use crate::error::DagError;
use crate::types::Hash;
use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Hash pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads. Defaults to available parallelism.
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

struct Job {
    index: usize,
    data: Vec<u8>,
    reply: mpsc::Sender<(usize, Hash)>,
}

/// A bounded set of reusable hashing workers.
///
/// Safe for concurrent use from many callers. Explicitly constructed and
/// explicitly shut down; after `shutdown`, every call fails with
/// `PoolClosed`. Dropping the pool shuts it down as well.
pub struct HashPool {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl HashPool {
    /// Spawn a pool with the given configuration.
    pub fn new(config: PoolConfig) -> Self {
        let worker_count = config.workers.max(1);
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let receiver = Arc::clone(&receiver);
            workers.push(thread::spawn(move || loop {
                // Hold the lock only for hand-off, never while hashing.
                let job = match receiver.lock().recv() {
                    Ok(job) => job,
                    Err(_) => break,
                };
                let digest: Hash = *blake3::hash(&job.data).as_bytes();
                // Caller may have given up waiting; that is not an error.
                let _ = job.reply.send((job.index, digest));
            }));
        }

        debug!(workers = worker_count, "Hash pool started");
        Self {
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
        }
    }

    /// Spawn a pool with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PoolConfig::default())
    }

    /// Compute the digest of one byte slice on a pool worker.
    pub fn compute(&self, data: &[u8]) -> Result<Hash, DagError> {
        self.compute_batch(&[data])?
            .into_iter()
            .next()
            .ok_or(DagError::PoolClosed)
    }

    /// Compute digests for all pieces, in input order.
    ///
    /// All pieces are submitted up front so independent chunks hash in
    /// parallel across the worker set.
    pub fn compute_batch(&self, pieces: &[&[u8]]) -> Result<Vec<Hash>, DagError> {
        let sender = self
            .sender
            .lock()
            .clone()
            .ok_or(DagError::PoolClosed)?;

        let (reply, results) = mpsc::channel();
        for (index, piece) in pieces.iter().enumerate() {
            sender
                .send(Job {
                    index,
                    data: piece.to_vec(),
                    reply: reply.clone(),
                })
                .map_err(|_| DagError::PoolClosed)?;
        }
        drop(reply);

        let mut digests = Vec::with_capacity(pieces.len());
        for _ in 0..pieces.len() {
            // A disconnect here means the pool was shut down with our jobs
            // still pending.
            let entry = results.recv().map_err(|_| DagError::PoolClosed)?;
            digests.push(entry);
        }
        digests.sort_by_key(|(index, _)| *index);
        trace!(pieces = pieces.len(), "Hashed batch");

        Ok(digests.into_iter().map(|(_, digest)| digest).collect())
    }

    /// Close the job channel and join all workers.
    ///
    /// In-flight jobs complete; pending and subsequent calls fail with
    /// `PoolClosed`. Idempotent.
    pub fn shutdown(&self) {
        let sender = self.sender.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let workers = std::mem::take(&mut *self.workers.lock());
        for handle in workers {
            let _ = handle.join();
        }
        debug!("Hash pool shut down");
    }
}

impl Drop for HashPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
