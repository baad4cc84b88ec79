//! Re-chunking a stream of blocks inside an async pipeline.
//!
//! A producer task sends irregular blocks through a bounded channel; the
//! re-chunked stream only pulls from the channel when its consumer asks for
//! the next chunk, so the producer is held back by the channel bound.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use rechunkrs::{RechunkConfig, rechunk_stream};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (tx, rx) = mpsc::channel::<std::io::Result<Bytes>>(2);

    let producer = tokio::spawn(async move {
        for i in 0..20usize {
            let block = Bytes::from(vec![i as u8; 1000 + i * 137]);
            if tx.send(Ok(block)).await.is_err() {
                break;
            }
        }
    });

    let blocks = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|block| (block, rx))
    });

    let mut chunks = rechunk_stream(Box::pin(blocks), RechunkConfig::new(4096)?)?;
    let mut total = 0usize;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        total += chunk.len();
        println!("Chunk {}: offset={}, len={}", chunk.index, chunk.offset, chunk.len());
    }

    producer.await?;
    println!("\nTotal: {} bytes", total);

    Ok(())
}
