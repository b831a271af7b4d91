//! CLI: parse, route, and present. No DAG logic lives here.

use crate::dag::builder::DagBuilder;
use crate::dag::reader;
use crate::node::Node;
use crate::object::ObjectKind;
use crate::pool::{HashPool, PoolConfig};
use crate::store::SledStore;
use crate::types::{Hash, DEFAULT_CHUNK_SIZE};
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "merkledag", version, about = "Content-addressed Merkle DAG store")]
pub struct Cli {
    /// Directory of the sled-backed store
    #[arg(long, global = true, default_value = ".merkledag")]
    pub store: PathBuf,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Number of hash workers (defaults to available parallelism)
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a file or directory tree and print its root hash
    Add {
        /// Filesystem path to ingest
        path: PathBuf,

        /// Maximum chunk size in bytes
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Write the bytes of the file at PATH under ROOT to stdout
    Cat {
        /// Root hash, hex-encoded
        root: String,

        /// Slash-separated path inside the tree (empty for a bare file)
        #[arg(default_value = "")]
        path: String,
    },

    /// List the links of the directory at PATH under ROOT
    Ls {
        /// Root hash, hex-encoded
        root: String,

        /// Slash-separated path inside the tree
        #[arg(default_value = "")]
        path: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Execute a parsed command and return its textual output.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let store = SledStore::open(&cli.store)
        .with_context(|| format!("failed to open store at {}", cli.store.display()))?;
    let pool = match cli.workers {
        Some(workers) => HashPool::new(PoolConfig { workers }),
        None => HashPool::with_defaults(),
    };

    match &cli.command {
        Commands::Add { path, chunk_size } => {
            let node = Node::from_fs(path)
                .with_context(|| format!("failed to load tree from {}", path.display()))?;
            let root = DagBuilder::new()
                .with_chunk_size(*chunk_size)
                .add(&store, &node, &pool)?;
            store.flush()?;
            Ok(hex::encode(root))
        }
        Commands::Cat { root, path } => {
            let root = parse_hash(root)?;
            let bytes = reader::hash_to_file(&store, &root, path, &pool)?;
            // File content may be binary; bypass the string return path.
            std::io::stdout().write_all(&bytes)?;
            Ok(String::new())
        }
        Commands::Ls { root, path, json } => {
            let root = parse_hash(root)?;
            let (_, object) = reader::resolve(&store, &root, path)?;
            if object.kind != ObjectKind::Dir {
                return Err(anyhow!("not a directory: {}", display_path(path)));
            }
            if *json {
                format_links_json(&object.links)
            } else {
                Ok(format_links_text(&object.links))
            }
        }
    }
}

/// Parse a hex-encoded 32-byte root hash.
fn parse_hash(input: &str) -> anyhow::Result<Hash> {
    let bytes = hex::decode(input.trim()).context("root hash is not valid hex")?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow!("root hash must be 32 bytes, got {}", bytes.len()))
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

fn format_links_text(links: &[crate::object::Link]) -> String {
    links
        .iter()
        .map(|link| format!("{}  {:>10}  {}", hex::encode(link.hash), link.size, link.name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_links_json(links: &[crate::object::Link]) -> anyhow::Result<String> {
    let entries: Vec<_> = links
        .iter()
        .map(|link| {
            serde_json::json!({
                "name": link.name,
                "hash": hex::encode(link.hash),
                "size": link.size,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
