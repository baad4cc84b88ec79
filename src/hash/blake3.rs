//! BLAKE3-based hashing implementation.

use crate::chunk::ChunkHash;

/// Incremental BLAKE3 hasher producing [`ChunkHash`] values.
#[derive(Debug, Clone)]
pub(crate) struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    pub(crate) fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    pub(crate) fn finalize(&self) -> ChunkHash {
        ChunkHash::new(self.state.finalize().into())
    }

    /// One-shot hash of a single buffer.
    pub(crate) fn hash(data: &[u8]) -> ChunkHash {
        ChunkHash::new(blake3::hash(data).into())
    }
}
