//! Async file re-chunking with tokio.
//!
//! Reads a file through `tokio_util::compat` and re-chunks it as a stream.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- /path/to/file

use futures_util::StreamExt;
use rechunkrs::{RechunkConfig, digest_chunks, rechunk_async};
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let original = tokio::fs::read(&path).await?;
    let file = tokio::fs::File::open(&path).await?;

    let config = RechunkConfig::new(512)?.with_read_buffer_size(4096);
    let mut stream = rechunk_async(file.compat(), config)?;

    let mut chunks = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        println!("Chunk {}: {} bytes", chunk.index, chunk.len());
        chunks.push(chunk);
    }

    let reassembled = digest_chunks(&chunks);
    let expected = blake3::hash(&original);
    println!("\nOriginal:    {}", expected.to_hex());
    println!("Reassembled: {}", reassembled);
    assert_eq!(reassembled.as_bytes(), expected.as_bytes());

    Ok(())
}
