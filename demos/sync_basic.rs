//! Basic push-style re-chunking example.
//!
//! Run with:
//!     RUST_LOG=rechunkrs=trace cargo run --example sync_basic

use rechunkrs::{RechunkConfig, Rechunker};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1 MB of sample data, delivered in irregular blocks
    let data: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();
    let block_sizes = [1000, 7 * 1024, 50_000, 3];

    let mut rechunker = Rechunker::new(RechunkConfig::new(100 * 1024)?)?;
    println!(
        "Re-chunking {} bytes into {} byte chunks...\n",
        data.len(),
        rechunker.chunk_size()
    );

    let mut chunks = Vec::new();
    let mut rest = &data[..];
    for size in block_sizes.iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (block, tail) = rest.split_at((*size).min(rest.len()));
        chunks.extend(rechunker.ingest(block)?);
        rest = tail;
    }
    chunks.extend(rechunker.finish());

    for chunk in &chunks {
        match chunk.hash {
            Some(hash) => println!(
                "Chunk {}: offset={}, len={}, hash={}",
                chunk.index,
                chunk.offset,
                chunk.len(),
                &hash.to_hex()[..16]
            ),
            None => println!(
                "Chunk {}: offset={}, len={}",
                chunk.index,
                chunk.offset,
                chunk.len()
            ),
        }
    }

    println!(
        "\nTotal: {} chunks, {} bytes",
        rechunker.chunks_emitted(),
        rechunker.offset()
    );

    Ok(())
}
