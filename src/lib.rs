//! rechunkrs
//!
//! Streaming fixed-size re-chunking for Rust.
//!
//! `rechunkrs` turns a stream of byte blocks of arbitrary sizes into a stream
//! of chunks of exactly one configured size. Only the last chunk of a stream
//! may be shorter. Typical uses:
//!
//! - uploading in fixed-size parts (multipart object storage)
//! - writing to block devices or record-oriented sinks
//! - normalizing network reads before further processing
//!
//! The crate intentionally:
//! - does NOT own the source or the sink
//! - does NOT manage concurrency
//! - does NOT frame, compress or encrypt the output
//! - does NOT seek
//!
//! It only does one thing: **blocks of any size in → chunks of one size out**,
//! in order, byte for byte.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use rechunkrs::{Rechunker, RechunkConfig, RechunkError};
//!
//! fn main() -> Result<(), RechunkError> {
//!     let file = File::open("data.bin")?;
//!     let rechunker = Rechunker::new(RechunkConfig::new(100 * 1024)?)?;
//!
//!     for chunk in rechunker.rechunk(file) {
//!         let chunk = chunk?;
//!         println!("chunk {} bytes", chunk.data.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Push
//!
//! ```
//! use rechunkrs::Rechunker;
//!
//! let mut rechunker = Rechunker::with_chunk_size(3)?;
//! let mut out = rechunker.ingest(b"ab")?;
//! out.extend(rechunker.ingest(b"cdefg")?);
//! out.extend(rechunker.finish());
//!
//! let parts: Vec<&[u8]> = out.iter().map(|c| &c.data[..]).collect();
//! assert_eq!(parts, [&b"abc"[..], b"def", b"g"]);
//! # Ok::<(), rechunkrs::RechunkError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rechunkrs::{rechunk_async, RechunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rechunkrs::RechunkError> {
//!     let mut stream = rechunk_async(reader, RechunkConfig::new(10 * 1024)?)?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.data.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod rechunker;

mod buffer; // internal pending output buffers
mod hash; // internal blake3 impl

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use chunk::{Chunk, ChunkHash};
pub use config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_READ_BUFFER_SIZE, HashConfig, MAX_CHUNK_SIZE, RechunkConfig,
};
pub use error::RechunkError;
pub use rechunker::{RechunkIter, Rechunker, rechunk_bytes};

#[cfg(feature = "hash-blake3")]
pub use hash::digest_chunks;

#[cfg(feature = "async-io")]
pub use async_stream::{RechunkStream, Rechunked, rechunk_async, rechunk_stream};
