//! Block stream adapter.
//!
//! [`Rechunked`] sits between a stream of arbitrarily sized byte blocks and
//! its consumer, turning the blocks into fixed-size chunks. This is the
//! in-pipeline form of the [`Rechunker`]: the upstream stream is only polled
//! when the consumer asks for a chunk and none is waiting.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures_core::Stream;
use futures_core::stream::FusedStream;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::RechunkConfig;
use crate::error::RechunkError;
use crate::rechunker::Rechunker;

pin_project! {
    /// A stream of fixed-size chunks built from a stream of byte blocks.
    ///
    /// Created by [`rechunk_stream`].
    pub struct Rechunked<S> {
        #[pin]
        blocks: S,
        rechunker: Rechunker,
        ready: VecDeque<Chunk>,
        done: bool,
    }
}

impl<S> fmt::Debug for Rechunked<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rechunked")
            .field("rechunker", &self.rechunker)
            .field("ready", &self.ready.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<S> Rechunked<S> {
    /// Returns the underlying rechunker.
    pub fn rechunker(&self) -> &Rechunker {
        &self.rechunker
    }
}

impl<S, B, E> Stream for Rechunked<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<RechunkError>,
{
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

            match ready!(this.blocks.as_mut().poll_next(cx)) {
                Some(Ok(block)) => {
                    if let Err(e) = this.rechunker.ingest_into(block.as_ref(), &mut *this.ready) {
                        *this.done = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                }
                Some(Err(e)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
                None => {
                    this.rechunker.finish_into(&mut *this.ready);
                    *this.done = true;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ready.len(), None)
    }
}

impl<S, B, E> FusedStream for Rechunked<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<RechunkError>,
{
    fn is_terminated(&self) -> bool {
        self.done && self.ready.is_empty()
    }
}

/// Re-chunks a stream of byte blocks into fixed-size chunks.
///
/// Each upstream item is a block of any length (`Bytes`, `Vec<u8>`, ...) or
/// an error convertible into [`RechunkError`] (for example
/// [`std::io::Error`]). An upstream error is forwarded once and ends the
/// stream; the buffered partial chunk is dropped.
///
/// # Example
///
/// ```ignore
/// use futures_util::{stream, StreamExt};
/// use rechunkrs::{rechunk_stream, RechunkConfig};
///
/// let blocks = stream::iter([Ok::<_, std::io::Error>(vec![0u8; 70]), Ok(vec![1u8; 50])]);
/// let chunks: Vec<_> = rechunk_stream(blocks, RechunkConfig::new(64)?)?
///     .collect()
///     .await;
/// assert_eq!(chunks.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`RechunkError::InvalidConfiguration`] if `config` does not
/// validate.
pub fn rechunk_stream<S>(blocks: S, config: RechunkConfig) -> Result<Rechunked<S>, RechunkError> {
    Ok(Rechunked {
        blocks,
        rechunker: Rechunker::new(config)?,
        ready: VecDeque::new(),
        done: false,
    })
}
