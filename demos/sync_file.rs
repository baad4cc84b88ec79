//! File re-chunking example: splits a file into fixed-size part files.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file [chunk_size] [out_dir]

use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

use rechunkrs::{RechunkConfig, Rechunker};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let chunk_size: usize = match args.next() {
        Some(size) => size.parse()?,
        None => 1024,
    };
    let out_dir = args.next().map(PathBuf::from);

    println!("Re-chunking file: {}\n", path);

    let file = File::open(&path)?;
    println!("File size: {} bytes\n", file.metadata()?.len());

    let rechunker = Rechunker::new(RechunkConfig::new(chunk_size)?)?;

    if let Some(dir) = &out_dir {
        fs::create_dir_all(dir)?;
    }

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    for chunk in rechunker.rechunk(file) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        if let Some(dir) = &out_dir {
            fs::write(dir.join(format!("part-{:06}", chunk.index)), &chunk.data)?;
        }

        println!(
            "Chunk {}: offset={:>10}, len={:>8}, hash={}",
            chunk.index,
            chunk.offset,
            chunk.len(),
            chunk.hash.map(|h| h.to_hex()).unwrap_or_default()
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);

    Ok(())
}
