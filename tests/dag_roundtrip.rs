//! Integration tests: build a DAG, persist it, and retrieve files back.

use merkledag::{
    add, hash_to_file, DagBuilder, DagError, HashPool, KVStore, MemoryStore, Node, PoolConfig,
};
use merkledag::store::SledStore;
use tempfile::TempDir;

fn sample_tree() -> Node {
    Node::dir(
        "root",
        vec![
            Node::file("a.txt", b"a.txt content".to_vec()),
            Node::file("b.txt", b"b.txt content".to_vec()),
            Node::dir(
                "docs",
                vec![
                    Node::file("readme.md", b"# readme".to_vec()),
                    Node::file("large.bin", (0..10_000u32).map(|i| (i % 256) as u8).collect()),
                ],
            ),
        ],
    )
}

#[test]
fn test_single_file_hello_scenario() {
    let store = MemoryStore::new();
    let pool = HashPool::with_defaults();

    let root = add(&store, &Node::file("a.txt", b"hello".to_vec()), &pool).unwrap();

    // One chunk, so the root is the digest of that chunk, no combination.
    assert_eq!(root, *blake3::hash(b"hello").as_bytes());
    assert_eq!(hash_to_file(&store, &root, "", &pool).unwrap(), b"hello");
}

#[test]
fn test_directory_roundtrip_memory() {
    let store = MemoryStore::new();
    let pool = HashPool::with_defaults();
    let root = add(&store, &sample_tree(), &pool).unwrap();

    assert_eq!(
        hash_to_file(&store, &root, "b.txt", &pool).unwrap(),
        b"b.txt content"
    );
    assert_eq!(
        hash_to_file(&store, &root, "docs/readme.md", &pool).unwrap(),
        b"# readme"
    );

    let large = hash_to_file(&store, &root, "docs/large.bin", &pool).unwrap();
    assert_eq!(large.len(), 10_000);
    assert_eq!(large[5000], (5000 % 256) as u8);
}

#[test]
fn test_directory_roundtrip_sled() {
    let temp_dir = TempDir::new().unwrap();
    let pool = HashPool::with_defaults();

    let root = {
        let store = SledStore::open(temp_dir.path()).unwrap();
        let root = add(&store, &sample_tree(), &pool).unwrap();
        store.flush().unwrap();
        root
    };

    // Retrieval works against a reopened store.
    let store = SledStore::open(temp_dir.path()).unwrap();
    assert_eq!(
        hash_to_file(&store, &root, "a.txt", &pool).unwrap(),
        b"a.txt content"
    );
    assert_eq!(
        hash_to_file(&store, &root, "docs/large.bin", &pool).unwrap().len(),
        10_000
    );
}

#[test]
fn test_missing_path_fails() {
    let store = MemoryStore::new();
    let pool = HashPool::with_defaults();
    let root = add(&store, &sample_tree(), &pool).unwrap();

    let err = hash_to_file(&store, &root, "c.txt", &pool).unwrap_err();
    assert!(matches!(err, DagError::PathNotFound(_)));

    let err = hash_to_file(&store, &root, "docs/missing.md", &pool).unwrap_err();
    assert!(matches!(err, DagError::PathNotFound(_)));
}

#[test]
fn test_unknown_root_fails_not_found() {
    let store = MemoryStore::new();
    let pool = HashPool::with_defaults();

    let err = hash_to_file(&store, &[0xABu8; 32], "a.txt", &pool).unwrap_err();
    assert!(matches!(err, DagError::NotFound(_)));
}

#[test]
fn test_identical_directories_share_root() {
    let pool = HashPool::with_defaults();

    // Built in separate add calls against separate stores.
    let root1 = add(&MemoryStore::new(), &sample_tree(), &pool).unwrap();
    let root2 = add(&MemoryStore::new(), &sample_tree(), &pool).unwrap();
    assert_eq!(root1, root2);
}

#[test]
fn test_avalanche_leaves_siblings_unchanged() {
    let pool = HashPool::with_defaults();
    let sibling = Node::file("stable.txt", b"unchanged".to_vec());

    let mut content: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
    let tree1 = Node::dir(
        "root",
        vec![sibling.clone(), Node::file("big.bin", content.clone())],
    );
    content[4321] ^= 0x01;
    let tree2 = Node::dir(
        "root",
        vec![sibling.clone(), Node::file("big.bin", content)],
    );

    let store1 = MemoryStore::new();
    let store2 = MemoryStore::new();
    let root1 = add(&store1, &tree1, &pool).unwrap();
    let root2 = add(&store2, &tree2, &pool).unwrap();

    // One flipped byte changes the root.
    assert_ne!(root1, root2);

    // The untouched sibling keeps its hash across both builds.
    let (_, dir1) = merkledag::dag::reader::resolve(&store1, &root1, "").unwrap();
    let (_, dir2) = merkledag::dag::reader::resolve(&store2, &root2, "").unwrap();
    let link1 = dir1.links.iter().find(|l| l.name == "stable.txt").unwrap();
    let link2 = dir2.links.iter().find(|l| l.name == "stable.txt").unwrap();
    assert_eq!(link1.hash, link2.hash);
    let big1 = dir1.links.iter().find(|l| l.name == "big.bin").unwrap();
    let big2 = dir2.links.iter().find(|l| l.name == "big.bin").unwrap();
    assert_ne!(big1.hash, big2.hash);
}

#[test]
fn test_chunk_size_changes_root() {
    let pool = HashPool::with_defaults();
    let node = Node::file("big.bin", vec![9u8; 4096]);

    let root1 = DagBuilder::new()
        .with_chunk_size(1024)
        .add(&MemoryStore::new(), &node, &pool)
        .unwrap();
    let root2 = DagBuilder::new()
        .with_chunk_size(512)
        .add(&MemoryStore::new(), &node, &pool)
        .unwrap();
    assert_ne!(root1, root2);
}

#[test]
fn test_custom_chunk_size_roundtrip() {
    let store = MemoryStore::new();
    let pool = HashPool::new(PoolConfig { workers: 2 });
    let content: Vec<u8> = (0..777u32).map(|i| (i * 13 % 256) as u8).collect();
    let node = Node::file("odd.bin", content.clone());

    let root = DagBuilder::new()
        .with_chunk_size(100)
        .add(&store, &node, &pool)
        .unwrap();
    assert_eq!(hash_to_file(&store, &root, "", &pool).unwrap(), content);
}

#[test]
fn test_failed_add_leaves_only_orphans() {
    // A store that fails after a fixed number of writes.
    struct FlakyStore {
        inner: MemoryStore,
        remaining: std::sync::atomic::AtomicUsize,
    }
    impl KVStore for FlakyStore {
        fn put(&self, key: &[u8], value: &[u8]) -> Result<(), merkledag::StoreError> {
            use std::sync::atomic::Ordering;
            if self.remaining.fetch_sub(1, Ordering::SeqCst) == 0 {
                return Err(merkledag::StoreError::Backend("disk full".to_string()));
            }
            self.inner.put(key, value)
        }
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, merkledag::StoreError> {
            self.inner.get(key)
        }
    }

    let store = FlakyStore {
        inner: MemoryStore::new(),
        remaining: std::sync::atomic::AtomicUsize::new(3),
    };
    let pool = HashPool::with_defaults();

    let err = add(&store, &sample_tree(), &pool).unwrap_err();
    assert!(matches!(err, DagError::Storage(_)));
}
