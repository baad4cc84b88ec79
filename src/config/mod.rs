//! Configuration for re-chunking behavior.
//!
//! - [`RechunkConfig`] - Target chunk size, reader block size and hashing
//! - [`HashConfig`] - Hash computation control

use crate::error::RechunkError;

/// Default target chunk size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Largest accepted chunk size.
///
/// No allocation can exceed `isize::MAX` bytes. Sizes up to this limit are
/// accepted but may still fail to allocate; that surfaces on the first
/// `ingest` as [`RechunkError::AllocationFailed`].
pub const MAX_CHUNK_SIZE: usize = isize::MAX as usize;

/// Default size of the blocks pulled from a reader (16 KiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 16 * 1024;

/// Configuration for fixed-size re-chunking.
///
/// Every emitted chunk is exactly `chunk_size` bytes long, except the final
/// one, which holds whatever is left at end of stream.
///
/// `read_buffer_size` only affects the reader adapters
/// ([`Rechunker::rechunk`](crate::Rechunker::rechunk) and, with `async-io`,
/// `rechunk_async`); it bounds how many bytes are pulled from the source per
/// read and never changes the produced chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RechunkConfig {
    chunk_size: usize,
    read_buffer_size: usize,
    hash_config: HashConfig,
}

impl RechunkConfig {
    /// Creates a new configuration with the given target chunk size.
    ///
    /// Returns error if `chunk_size` is zero or above [`MAX_CHUNK_SIZE`].
    pub fn new(chunk_size: usize) -> Result<Self, RechunkError> {
        let config = Self {
            chunk_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the target chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the size of blocks read from a source by the reader adapters.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Sets the hash configuration.
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the target chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the reader block size.
    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), RechunkError> {
        if self.chunk_size == 0 {
            return Err(RechunkError::InvalidConfiguration {
                message: "chunk_size must be non-zero",
            });
        }

        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(RechunkError::InvalidConfiguration {
                message: "chunk_size exceeds MAX_CHUNK_SIZE",
            });
        }

        if self.read_buffer_size == 0 {
            return Err(RechunkError::InvalidConfiguration {
                message: "read_buffer_size must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for RechunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            hash_config: HashConfig::default(),
        }
    }
}

/// Configuration for chunk hashing.
///
/// Controls whether a BLAKE3 hash is computed for each emitted chunk. Has no
/// effect unless the `hash-blake3` feature is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashConfig {
    /// Whether to compute BLAKE3 hashes.
    pub enabled: bool,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables hashing.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
