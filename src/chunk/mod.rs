//! Chunk types.
//!
//! - [`Chunk`] - Output block with data, index, offset, hash
//! - [`ChunkHash`] - 32-byte BLAKE3 digest

mod data;
mod hash;

pub use data::Chunk;
pub use hash::ChunkHash;
