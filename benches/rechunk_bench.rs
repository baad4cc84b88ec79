//! Benchmarks for rechunkrs.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use rechunkrs::{HashConfig, RechunkConfig, Rechunker};

fn feed(config: RechunkConfig, data: &[u8], block_size: usize) -> usize {
    let mut rechunker = Rechunker::new(config).unwrap();
    let mut count = 0;
    for block in data.chunks(block_size) {
        count += rechunker.ingest(block).unwrap().len();
    }
    count + rechunker.finish().len()
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_size");
    let size = 8 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    for chunk_size in [10 * 1024, 100 * 1024, 2 * 1024 * 1024] {
        let config = RechunkConfig::new(chunk_size)
            .unwrap()
            .with_hash_config(HashConfig::disabled());
        group.bench_function(format!("{}kb", chunk_size / 1024), |b| {
            b.iter(|| black_box(feed(config, black_box(&data), 64 * 1024)));
        });
    }

    group.finish();
}

fn bench_block_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_size");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    let config = RechunkConfig::new(64 * 1024)
        .unwrap()
        .with_hash_config(HashConfig::disabled());

    for block_size in [512, 16 * 1024, 1024 * 1024] {
        group.bench_function(format!("{}b_blocks", block_size), |b| {
            b.iter(|| black_box(feed(config, black_box(&data), block_size)));
        });
    }

    group.finish();
}

fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    for (name, hash) in [("no_hash", HashConfig::disabled()), ("blake3", HashConfig::enabled())] {
        let config = RechunkConfig::new(64 * 1024).unwrap().with_hash_config(hash);
        group.bench_function(name, |b| {
            b.iter(|| black_box(feed(config, black_box(&data), 16 * 1024)));
        });
    }

    group.finish();
}

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("iterator", |b| {
        b.iter(|| {
            let cursor = std::io::Cursor::new(black_box(&data));
            let rechunker = Rechunker::new(
                RechunkConfig::new(100 * 1024)
                    .unwrap()
                    .with_hash_config(HashConfig::disabled()),
            )
            .unwrap();
            let mut count = 0;
            for chunk in rechunker.rechunk(cursor) {
                let _ = chunk.unwrap();
                count += 1;
            }
            black_box(count)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_chunk_sizes,
    bench_block_sizes,
    bench_hashing,
    bench_reader
);
criterion_main!(benches);
