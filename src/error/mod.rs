//! Error types for rechunkrs.

use std::fmt;

/// Errors that can occur while re-chunking a stream.
#[derive(Debug)]
pub enum RechunkError {
    /// An I/O error occurred while reading from the caller's source.
    ///
    /// Only the reader and stream adapters produce this; the core
    /// [`Rechunker`](crate::Rechunker) performs no I/O.
    Io(std::io::Error),

    /// Invalid configuration parameter.
    InvalidConfiguration {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// Input was pushed after the stream had been finished.
    StreamClosed,

    /// A pending output buffer of `size` bytes could not be allocated.
    ///
    /// Bytes of the rejected block may already be buffered; the stream
    /// should be [`reset`](crate::Rechunker::reset) or abandoned.
    AllocationFailed {
        /// The requested buffer size.
        size: usize,
    },
}

impl fmt::Display for RechunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RechunkError::Io(e) => write!(f, "io error: {}", e),
            RechunkError::InvalidConfiguration { message } => {
                write!(f, "invalid configuration: {}", message)
            }
            RechunkError::StreamClosed => {
                write!(f, "stream closed: ingest called after finish")
            }
            RechunkError::AllocationFailed { size } => {
                write!(f, "failed to allocate a {} byte chunk buffer", size)
            }
        }
    }
}

impl std::error::Error for RechunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RechunkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RechunkError {
    fn from(e: std::io::Error) -> Self {
        RechunkError::Io(e)
    }
}
