//! Async reader adapter.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rechunkrs::{rechunk_async, RechunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rechunkrs::RechunkError> {
//!     let mut stream = rechunk_async(reader, RechunkConfig::new(1 << 20)?)?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("Chunk {}: {} bytes", chunk.index, chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures_core::Stream;
use futures_core::stream::FusedStream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::RechunkConfig;
use crate::error::RechunkError;
use crate::rechunker::Rechunker;

pin_project! {
    /// A stream that yields fixed-size chunks from an async reader.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic.
    /// Works with tokio (through `tokio_util::compat`), async-std, smol, or
    /// any futures-compatible runtime.
    ///
    /// The reader is polled only while no produced chunk is waiting, so a
    /// consumer that stops polling the stream stops reading the source.
    pub struct RechunkStream<R> {
        #[pin]
        reader: R,
        rechunker: Rechunker,
        read_buf: Vec<u8>,
        ready: VecDeque<Chunk>,
        done: bool,
    }
}

impl<R> fmt::Debug for RechunkStream<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RechunkStream")
            .field("rechunker", &self.rechunker)
            .field("ready", &self.ready.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<R> RechunkStream<R> {
    fn new(reader: R, rechunker: Rechunker) -> Self {
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
}

impl<R: AsyncRead> Stream for RechunkStream<R> {
    type Item = Result<Chunk, RechunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(chunk) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }

            if *this.done {
                return Poll::Ready(None);
            }

            match ready!(this.reader.as_mut().poll_read(cx, &mut this.read_buf[..])) {
                Ok(0) => {
                    this.rechunker.finish_into(&mut *this.ready);
                    *this.done = true;
                }
                Ok(n) => {
                    if let Err(e) = this
                        .rechunker
                        .ingest_into(&this.read_buf[..n], &mut *this.ready)
                    {
                        *this.done = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(RechunkError::Io(e))));
                }
            }
        }
    }
}

impl<R: AsyncRead> FusedStream for RechunkStream<R> {
    fn is_terminated(&self) -> bool {
        self.done && self.ready.is_empty()
    }
}

/// Creates a fixed-size chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use rechunkrs::{rechunk_async, RechunkConfig};
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = rechunk_async(file.compat(), RechunkConfig::new(10 * 1024)?)?;
/// ```
///
/// # Errors
///
/// Returns [`RechunkError::InvalidConfiguration`] if `config` does not
/// validate.
pub fn rechunk_async<R: AsyncRead>(
    reader: R,
    config: RechunkConfig,
) -> Result<RechunkStream<R>, RechunkError> {
    Ok(RechunkStream::new(reader, Rechunker::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tokio_util::compat::TokioAsyncReadCompatExt;

    fn config(chunk_size: usize, read_buffer_size: usize) -> RechunkConfig {
        RechunkConfig::new(chunk_size)
            .unwrap()
            .with_read_buffer_size(read_buffer_size)
    }

    #[tokio::test]
    async fn test_stream_debug_skips_reader() {
        let reader = tokio_test::io::Builder::new().read(b"abcdef").build();
        let config = RechunkConfig::new(4).unwrap();
        let mut stream = rechunk_async(reader.compat(), config).unwrap();
        stream.next().await.unwrap().unwrap();

        let out = format!("{:?}", stream);
        assert!(out.starts_with("RechunkStream"));
        assert!(out.contains("done: false"));
        assert!(out.contains("Rechunker"));
    }

    #[tokio::test]
    async fn test_stream_empty() {
        let reader: &[u8] = &[];
        let stream = rechunk_async(reader, RechunkConfig::default()).unwrap();
        let chunks: Vec<_> = stream.collect().await;
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_stream_sizes_and_content() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let reader: &[u8] = &data;
        let stream = rechunk_async(reader, config(128, 100)).unwrap();

        let chunks: Vec<Chunk> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(chunks.len(), 8);
        assert!(chunks[..7].iter().all(|c| c.len() == 128));
        assert_eq!(chunks[7].len(), 1000 - 7 * 128);

        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.to_vec()).collect();
        assert_eq!(joined, data);
    }

    #[tokio::test]
    async fn test_stream_invalid_config() {
        let reader: &[u8] = b"abc";
        let config = RechunkConfig::default().with_chunk_size(0);
        assert!(rechunk_async(reader, config).is_err());
    }

    #[tokio::test]
    async fn test_stream_propagates_read_error() {
        let mock = tokio_test::io::Builder::new()
            .read(b"0123456789")
            .read_error(std::io::Error::new(ErrorKind::ConnectionReset, "reset"))
            .build();
        let mut stream = rechunk_async(mock.compat(), config(4, 16)).unwrap();

        let mut sizes = Vec::new();
        let mut failed = false;
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => sizes.push(chunk.len()),
                Err(RechunkError::Io(e)) => {
                    assert_eq!(e.kind(), ErrorKind::ConnectionReset);
                    failed = true;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert!(failed);
        assert_eq!(sizes, [4, 4]);
        assert!(stream.is_terminated());
    }

    #[tokio::test]
    #[cfg(feature = "hash-blake3")]
    async fn test_stream_with_hashes() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let reader: &[u8] = &data;
        let stream = rechunk_async(reader, config(256, 64)).unwrap();

        let chunks: Vec<_> = stream.collect().await;
        for chunk in chunks {
            let chunk = chunk.unwrap();
            assert_eq!(chunk.hash, Some(crate::hash::Blake3Hasher::hash(&chunk.data)));
        }
    }
}
