use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use merkledag::{DagBuilder, HashPool, MemoryStore, Node};

fn bench_add_single_file(c: &mut Criterion) {
    let pool = HashPool::with_defaults();
    let mut group = c.benchmark_group("add_single_file");

    for size in [16 * 1024usize, 256 * 1024, 1024 * 1024] {
        let content: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| {
                let store = MemoryStore::new();
                let node = Node::file("bench.bin", content.clone());
                DagBuilder::new().add(&store, &node, &pool).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_add_wide_directory(c: &mut Criterion) {
    let pool = HashPool::with_defaults();
    let mut group = c.benchmark_group("add_wide_directory");

    for files in [16usize, 128, 512] {
        let children: Vec<Node> = (0..files)
            .map(|i| Node::file(format!("f{}.bin", i), vec![(i % 256) as u8; 2048]))
            .collect();
        let tree = Node::dir("root", children);
        group.bench_with_input(BenchmarkId::from_parameter(files), &tree, |b, tree| {
            b.iter(|| {
                let store = MemoryStore::new();
                DagBuilder::new().add(&store, tree, &pool).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add_single_file, bench_add_wide_directory);
criterion_main!(benches);
