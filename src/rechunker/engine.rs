//! Core re-chunking engine.
//!
//! [`Rechunker`] is a push-based state machine:
//!
//! - `ingest()` - Feed a block of any size (1 byte, 8KB, 1MB, etc.)
//! - `finish()` - Flush the buffered tail when the stream ends
//!
//! Input bytes are copied into a small FIFO of pending output buffers, each
//! allocated with exactly `chunk_size` capacity. A buffer is emitted the
//! moment it is full, so output order always equals input order.
//!
//! # Example
//!
//! ```
//! use rechunkrs::Rechunker;
//!
//! let mut rechunker = Rechunker::with_chunk_size(4)?;
//!
//! let first = rechunker.ingest(b"abcdef")?;
//! assert_eq!(first.len(), 1);
//! assert_eq!(&first[0].data[..], b"abcd");
//!
//! let rest = rechunker.finish();
//! assert_eq!(&rest[0].data[..], b"ef");
//! # Ok::<(), rechunkrs::RechunkError>(())
//! ```

use std::collections::VecDeque;
use std::io::Read;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use super::RechunkIter;
use crate::buffer::PendingBuffer;
use crate::chunk::{Chunk, ChunkHash};
use crate::config::RechunkConfig;
use crate::error::RechunkError;

/// Re-chunks a byte stream into fixed-size chunks.
///
/// `Rechunker` accepts input blocks of arbitrary length through
/// [`ingest`](Self::ingest) and returns every chunk that became complete
/// during that call. When the input ends, [`finish`](Self::finish) returns
/// the remaining partial chunk, if any.
///
/// # Guarantees
///
/// - Concatenating all emitted chunks reproduces the input byte for byte
/// - Every chunk is exactly `chunk_size` bytes, except possibly the last one
/// - The output does not depend on how the input was split into blocks
/// - Empty input produces no chunks
///
/// # Backpressure
///
/// `ingest` never blocks and does no I/O. Chunks completed by a call are
/// handed back to the caller before the next block can be pushed, so the
/// caller controls when more input is pulled. The pull-based adapters
/// ([`Rechunker::rechunk`] and the `async-io` streams) only read from their
/// source once every previously produced chunk has been consumed.
///
/// # Example
///
/// ```
/// use rechunkrs::{RechunkConfig, Rechunker};
///
/// let mut rechunker = Rechunker::new(RechunkConfig::new(10)?)?;
///
/// let mut chunks = Vec::new();
/// for block in [&b"0123"[..], b"456789012", b"3456789012345"] {
///     chunks.extend(rechunker.ingest(block)?);
/// }
/// chunks.extend(rechunker.finish());
///
/// let sizes: Vec<_> = chunks.iter().map(|c| c.len()).collect();
/// assert_eq!(sizes, [10, 10, 6]);
/// # Ok::<(), rechunkrs::RechunkError>(())
/// ```
#[derive(Debug)]
pub struct Rechunker {
    config: RechunkConfig,
    pending: VecDeque<PendingBuffer>,
    offset: u64,
    next_index: u64,
    finished: bool,
}

impl Rechunker {
    /// Creates a new rechunker with the given configuration.
    ///
    /// Returns [`RechunkError::InvalidConfiguration`] if the configuration
    /// does not validate (for instance a zero chunk size).
    pub fn new(config: RechunkConfig) -> Result<Self, RechunkError> {
        config.validate()?;
        debug!(chunk_size = config.chunk_size(), "rechunker created");

        Ok(Self {
            config,
            pending: VecDeque::new(),
            offset: 0,
            next_index: 0,
            finished: false,
        })
    }

    /// Creates a rechunker with the default configuration and the given
    /// chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self, RechunkError> {
        Self::new(RechunkConfig::default().with_chunk_size(chunk_size))
    }

    /// Pushes one input block and returns the chunks it completed.
    ///
    /// The block is copied; the caller keeps ownership of its memory. An
    /// empty block is a no-op.
    ///
    /// # Errors
    ///
    /// [`RechunkError::StreamClosed`] if [`finish`](Self::finish) was already
    /// called (and the rechunker was not [`reset`](Self::reset)).
    ///
    /// [`RechunkError::AllocationFailed`] if a new chunk buffer could not be
    /// allocated.
    pub fn ingest(&mut self, block: &[u8]) -> Result<Vec<Chunk>, RechunkError> {
        let mut chunks = Vec::new();
        self.ingest_into(block, &mut chunks)?;
        Ok(chunks)
    }

    /// Ends the stream and returns the buffered tail.
    ///
    /// Returns at most one short chunk in practice. After this call the
    /// rechunker rejects further input until [`reset`](Self::reset). Calling
    /// `finish` again returns an empty vector.
    pub fn finish(&mut self) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        self.finish_into(&mut chunks);
        chunks
    }

    /// Same as [`ingest`](Self::ingest), appending to `out` instead of
    /// allocating.
    pub(crate) fn ingest_into(
        &mut self,
        block: &[u8],
        out: &mut impl Extend<Chunk>,
    ) -> Result<(), RechunkError> {
        if self.finished {
            warn!(len = block.len(), "ingest rejected: stream already finished");
            return Err(RechunkError::StreamClosed);
        }

        let chunk_size = self.config.chunk_size();
        let mut source = block;

        while !source.is_empty() {
            // First buffer with room, oldest first; allocate one if all are full
            let slot = match self.pending.iter().position(|buf| !buf.is_full()) {
                Some(slot) => slot,
                None => {
                    self.pending
                        .push_back(PendingBuffer::try_with_capacity(chunk_size)?);
                    trace!(
                        chunk_size,
                        queued = self.pending.len(),
                        "pending buffer allocated"
                    );
                    self.pending.len() - 1
                }
            };

            let copied = self.pending[slot].fill_from(source);
            source = &source[copied..];
        }

        self.drain_into(out);
        Ok(())
    }

    /// Same as [`finish`](Self::finish), appending to `out`.
    pub(crate) fn finish_into(&mut self, out: &mut impl Extend<Chunk>) {
        let before = self.offset;
        let mut flushed = 0usize;

        for buffer in std::mem::take(&mut self.pending) {
            if buffer.is_empty() {
                continue;
            }
            // Full buffers are normally drained by ingest; flush them whole if one is left.
            let chunk = self.emit(buffer.freeze());
            out.extend(Some(chunk));
            flushed += 1;
        }

        if !self.finished {
            debug!(
                chunks = flushed,
                bytes = self.offset - before,
                total_chunks = self.next_index,
                total_bytes = self.offset,
                "rechunker finished"
            );
        }
        self.finished = true;
    }

    /// Emits full buffers from the front of the queue, oldest first.
    fn drain_into(&mut self, out: &mut impl Extend<Chunk>) {
        while self.pending.front().is_some_and(PendingBuffer::is_full) {
            let Some(buffer) = self.pending.pop_front() else {
                break;
            };
            let chunk = self.emit(buffer.freeze());
            out.extend(Some(chunk));
        }
    }

    /// Wraps finished bytes into a [`Chunk`] and advances the counters.
    fn emit(&mut self, data: Bytes) -> Chunk {
        let chunk = Chunk {
            hash: self.compute_hash(&data),
            index: self.next_index,
            offset: self.offset,
            data,
        };

        trace!(index = chunk.index, len = chunk.len(), "chunk emitted");
        self.next_index += 1;
        self.offset += chunk.len() as u64;
        chunk
    }

    /// Computes hash for the given data if hashing is enabled.
    fn compute_hash(&self, data: &[u8]) -> Option<ChunkHash> {
        if !self.config.hash_config().enabled {
            return None;
        }
        #[cfg(feature = "hash-blake3")]
        return Some(crate::hash::Blake3Hasher::hash(data));
        #[cfg(not(feature = "hash-blake3"))]
        {
            let _ = data;
            None
        }
    }

    /// Turns this rechunker into an iterator over the chunks of `reader`.
    ///
    /// The reader is consumed in blocks of
    /// [`read_buffer_size`](RechunkConfig::read_buffer_size) bytes. A new
    /// block is only read once every chunk produced so far has been yielded.
    ///
    /// # Example
    ///
    /// ```
    /// use rechunkrs::Rechunker;
    /// use std::io::Cursor;
    ///
    /// let data = vec![1u8; 2500];
    /// let chunks = Rechunker::with_chunk_size(1000)?
    ///     .rechunk(Cursor::new(&data))
    ///     .collect::<Result<Vec<_>, _>>()?;
    ///
    /// assert_eq!(chunks.len(), 3);
    /// assert_eq!(chunks[2].len(), 500);
    /// # Ok::<(), rechunkrs::RechunkError>(())
    /// ```
    pub fn rechunk<R: Read>(self, reader: R) -> RechunkIter<R> {
        RechunkIter::new(reader, self)
    }

    /// Clears all buffered data and reopens the stream.
    ///
    /// Chunk index and offset restart at zero.
    pub fn reset(&mut self) {
        debug!(
            discarded_bytes = self.pending_len(),
            "rechunker reset"
        );
        self.pending.clear();
        self.offset = 0;
        self.next_index = 0;
        self.finished = false;
    }

    /// Returns the number of bytes emitted so far.
    ///
    /// This is the stream offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of chunks emitted so far.
    pub fn chunks_emitted(&self) -> u64 {
        self.next_index
    }

    /// Returns the number of buffered bytes not yet emitted.
    pub fn pending_len(&self) -> usize {
        self.pending.iter().map(PendingBuffer::filled).sum()
    }

    /// Returns the number of pending output buffers.
    pub fn pending_buffers(&self) -> usize {
        self.pending.len()
    }

    /// Returns true once [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the target chunk size.
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size()
    }

    /// Returns the configuration used by this rechunker.
    pub fn config(&self) -> &RechunkConfig {
        &self.config
    }
}

impl Default for Rechunker {
    fn default() -> Self {
        Self {
            config: RechunkConfig::default(),
            pending: VecDeque::new(),
            offset: 0,
            next_index: 0,
            finished: false,
        }
    }
}

/// Re-chunks an in-memory buffer in one call.
///
/// Equivalent to a single [`Rechunker::ingest`] followed by
/// [`Rechunker::finish`].
///
/// # Example
///
/// ```
/// let chunks = rechunkrs::rechunk_bytes(4, b"hello world")?;
/// let parts: Vec<&[u8]> = chunks.iter().map(|c| &c.data[..]).collect();
/// assert_eq!(parts, [&b"hell"[..], b"o wo", b"rld"]);
/// # Ok::<(), rechunkrs::RechunkError>(())
/// ```
pub fn rechunk_bytes(chunk_size: usize, data: &[u8]) -> Result<Vec<Chunk>, RechunkError> {
    let mut rechunker = Rechunker::with_chunk_size(chunk_size)?;
    let mut chunks = rechunker.ingest(data)?;
    rechunker.finish_into(&mut chunks);
    Ok(chunks)
}
