//! In-memory node model for trees handed to the DAG builder.
//!
//! A `Node` is either a file holding its raw content or a directory owning
//! an ordered collection of child nodes. Children are exclusively owned by
//! their parent, so a tree reachable from one root can never contain cycles.

use crate::error::StoreError;
use std::path::Path;

/// Discriminator over the two node shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

/// A file node: name plus immutable raw content.
#[derive(Debug, Clone)]
pub struct FileNode {
    name: String,
    content: Vec<u8>,
}

impl FileNode {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file's raw content.
    pub fn bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// A directory node: name plus ordered, exclusively owned children.
#[derive(Debug, Clone)]
pub struct DirNode {
    name: String,
    children: Vec<Node>,
}

impl DirNode {
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward-only iteration over children in their natural order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total size of the subtree rooted here.
    pub fn size(&self) -> u64 {
        self.children.iter().map(Node::size).sum()
    }
}

/// A node in the caller's in-memory tree.
#[derive(Debug, Clone)]
pub enum Node {
    File(FileNode),
    Dir(DirNode),
}

impl Node {
    pub fn file(name: impl Into<String>, content: Vec<u8>) -> Self {
        Node::File(FileNode::new(name, content))
    }

    pub fn dir(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Dir(DirNode::new(name, children))
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => f.name(),
            Node::Dir(d) => d.name(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Dir(_) => NodeKind::Dir,
        }
    }

    /// Byte count: content length for files, sum of children for directories.
    pub fn size(&self) -> u64 {
        match self {
            Node::File(f) => f.size(),
            Node::Dir(d) => d.size(),
        }
    }

    /// Load a filesystem tree into an in-memory node tree.
    ///
    /// Directory entries are sorted by name so the resulting tree (and
    /// therefore its root hash) is deterministic across platforms. Symlinks
    /// and other special files are skipped.
    pub fn from_fs(path: &Path) -> Result<Node, StoreError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());

        let meta = std::fs::symlink_metadata(path)?;
        if meta.is_file() {
            let content = std::fs::read(path)?;
            return Ok(Node::file(name, content));
        }
        if !meta.is_dir() {
            return Err(StoreError::Backend(format!(
                "unsupported filesystem entry: {}",
                path.display()
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(path)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|e| e.path())
            .collect();
        entries.sort();

        let mut children = Vec::with_capacity(entries.len());
        for child_path in entries {
            let child_meta = std::fs::symlink_metadata(&child_path)?;
            if !child_meta.is_file() && !child_meta.is_dir() {
                continue;
            }
            children.push(Node::from_fs(&child_path)?);
        }

        Ok(Node::dir(name, children))
    }
}
