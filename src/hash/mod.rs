//! BLAKE3 hashing of chunks and reassembled streams.
//!
//! - [`Blake3Hasher`] - incremental BLAKE3 (requires `hash-blake3` feature)
//! - [`digest_chunks`] - digest of a chunk sequence's concatenated bytes

#[cfg(feature = "hash-blake3")]
mod blake3;

#[cfg(feature = "hash-blake3")]
pub(crate) use blake3::Blake3Hasher;

#[cfg(feature = "hash-blake3")]
use crate::chunk::{Chunk, ChunkHash};

/// Computes the BLAKE3 digest of the bytes obtained by concatenating `chunks`
/// in order.
///
/// Because re-chunking preserves content, the digest of the emitted chunks
/// equals the digest of the original input stream.
///
/// # Example
///
/// ```
/// use rechunkrs::digest_chunks;
///
/// let data = vec![7u8; 1000];
/// let chunks = rechunkrs::rechunk_bytes(64, &data)?;
/// assert_eq!(digest_chunks(&chunks).as_bytes(), blake3::hash(&data).as_bytes());
/// # Ok::<(), rechunkrs::RechunkError>(())
/// ```
#[cfg(feature = "hash-blake3")]
pub fn digest_chunks<'a, I>(chunks: I) -> ChunkHash
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut hasher = Blake3Hasher::new();
    for chunk in chunks {
        hasher.update(&chunk.data);
    }
    hasher.finalize()
}
