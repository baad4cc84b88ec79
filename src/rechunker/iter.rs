//! Synchronous reader adapter.
//!
//! [`RechunkIter`] drives a [`Rechunker`] from any [`std::io::Read`] source
//! and yields fixed-size chunks one at a time.
//!
//! # Example
//!
//! ```no_run
//! use rechunkrs::{RechunkConfig, Rechunker};
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let rechunker = Rechunker::new(RechunkConfig::new(1024 * 1024)?)?;
//!
//! for chunk in rechunker.rechunk(file) {
//!     let chunk = chunk?;
//!     println!("Chunk {}: {} bytes", chunk.index, chunk.len());
//! }
//! # Ok::<(), rechunkrs::RechunkError>(())
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use super::Rechunker;
use crate::chunk::Chunk;
use crate::error::RechunkError;

/// An iterator that yields fixed-size chunks read from a reader.
///
/// Created by [`Rechunker::rechunk`]. The reader is only read when no
/// produced chunk is waiting to be yielded, so at most one read block worth
/// of chunks is ever queued.
///
/// Reads interrupted with [`ErrorKind::Interrupted`] are retried. Any other
/// read error is yielded once, after which the iterator is exhausted and the
/// buffered partial chunk is dropped.
pub struct RechunkIter<R> {
    reader: R,
    rechunker: Rechunker,
    read_buf: Vec<u8>,
    ready: VecDeque<Chunk>,
    done: bool,
}

impl<R: Read> RechunkIter<R> {
    pub(super) fn new(reader: R, rechunker: Rechunker) -> Self {
        let read_buf = vec![0u8; rechunker.config().read_buffer_size()];
        Self {
            reader,
            rechunker,
            read_buf,
            ready: VecDeque::new(),
            done: false,
        }
    }

    /// Returns the underlying rechunker.
    pub fn rechunker(&self) -> &Rechunker {
        &self.rechunker
    }

    /// Consumes the iterator and returns the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> fmt::Debug for RechunkIter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RechunkIter")
            .field("rechunker", &self.rechunker)
            .field("ready", &self.ready.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<R: Read> Iterator for RechunkIter<R> {
    type Item = Result<Chunk, RechunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(Ok(chunk));
            }

            if self.done {
                return None;
            }

            match self.reader.read(&mut self.read_buf) {
                Ok(0) => {
                    self.rechunker.finish_into(&mut self.ready);
                    self.done = true;
                }
                Ok(n) => {
                    if let Err(e) = self
                        .rechunker
                        .ingest_into(&self.read_buf[..n], &mut self.ready)
                    {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for RechunkIter<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RechunkConfig;
    use std::io::{self, Cursor};

    /// Reader that returns at most `step` bytes per call and fails after `fail_at` bytes.
    struct FlakyReader {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        fail_at: Option<usize>,
        interrupted: bool,
    }

    impl Read for FlakyReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "try again"));
            }
            if self.fail_at.is_some_and(|at| self.pos >= at) {
                return Err(io::Error::new(ErrorKind::BrokenPipe, "source gone"));
            }
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn rechunker(chunk_size: usize, read_buffer_size: usize) -> Rechunker {
        let config = RechunkConfig::new(chunk_size)
            .unwrap()
            .with_read_buffer_size(read_buffer_size);
        Rechunker::new(config).unwrap()
    }

    #[test]
    fn test_iter_debug_skips_reader() {
        let rechunker = Rechunker::with_chunk_size(4).unwrap();
        let mut iter = rechunker.rechunk(Cursor::new(b"abcdef".to_vec()));
        iter.next();

        let out = format!("{:?}", iter);
        assert!(out.starts_with("RechunkIter"));
        assert!(out.contains("ready: 0"));
        assert!(out.contains("Rechunker"));
        assert!(!out.contains("Cursor"));
    }

    #[test]
    fn test_iter_empty() {
        let mut iter = rechunker(8, 4).rechunk(Cursor::new(Vec::new()));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_sizes() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();
        let chunks: Vec<_> = rechunker(300, 64)
            .rechunk(Cursor::new(&data))
            .collect::<Result<_, _>>()
            .unwrap();

        let sizes: Vec<_> = chunks.iter().map(Chunk::len).collect();
        assert_eq!(sizes, [300, 300, 300, 100]);

        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn test_iter_retries_interrupted() {
        let reader = FlakyReader {
            data: vec![9u8; 50],
            pos: 0,
            step: 7,
            fail_at: None,
            interrupted: false,
        };
        let chunks: Vec<_> = rechunker(20, 16)
            .rechunk(reader)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 10);
    }

    #[test]
    fn test_iter_propagates_error_then_stops() {
        let reader = FlakyReader {
            data: vec![1u8; 100],
            pos: 0,
            step: 10,
            fail_at: Some(30),
            interrupted: true,
        };
        let mut iter = rechunker(20, 16).rechunk(reader);

        let first = iter.next().unwrap().unwrap();
        assert_eq!(first.len(), 20);

        let err = iter.next().unwrap().unwrap_err();
        assert!(matches!(err, RechunkError::Io(ref e) if e.kind() == ErrorKind::BrokenPipe));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_on_finished_rechunker() {
        let mut finished = rechunker(4, 4);
        finished.finish();

        let mut iter = finished.rechunk(Cursor::new(b"abcd".to_vec()));
        assert!(matches!(
            iter.next(),
            Some(Err(RechunkError::StreamClosed))
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_reads_lazily() {
        let data = vec![0u8; 64];
        let mut iter = rechunker(4, 16).rechunk(Cursor::new(data));

        // One 16-byte read yields four chunks before the next read
        for _ in 0..4 {
            iter.next().unwrap().unwrap();
        }
        assert_eq!(iter.reader.position(), 16);
        iter.next().unwrap().unwrap();
        assert_eq!(iter.reader.position(), 32);
        assert_eq!(iter.rechunker().chunks_emitted(), 8);
    }
}
