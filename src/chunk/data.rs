//! The Chunk type - one fixed-size output block.

use bytes::Bytes;
use std::fmt;

use super::ChunkHash;

/// An output block emitted by the [`Rechunker`](crate::Rechunker).
///
/// `data` is exactly the configured chunk size for every chunk except,
/// possibly, the last chunk of a stream.
///
/// # Example
///
/// ```
/// use rechunkrs::Chunk;
/// use bytes::Bytes;
///
/// let chunk = Chunk {
///     data: Bytes::from_static(b"hello world"),
///     index: 2,
///     offset: 22,
///     hash: None,
/// };
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 22..33);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk bytes.
    pub data: Bytes,

    /// Position of this chunk in the output sequence (0-based).
    pub index: u64,

    /// Offset of the first byte of this chunk in the original stream.
    pub offset: u64,

    /// The content hash of this chunk (if computed).
    pub hash: Option<ChunkHash>,
}

impl Chunk {
    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    ///
    /// Chunks emitted by a `Rechunker` are never empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the hash, if computed.
    pub fn hash(&self) -> Option<ChunkHash> {
        self.hash
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the byte range this chunk covers in the original stream.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Chunk> for Bytes {
    fn from(chunk: Chunk) -> Self {
        chunk.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk#{}({} bytes @ {}", self.index, self.len(), self.offset)?;
        if let Some(hash) = self.hash {
            write!(f, ", hash={}", hash)?;
        }
        write!(f, ")")
    }
}
