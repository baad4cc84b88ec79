//! Re-chunking engine and its synchronous reader adapter.
//!
//! - [`Rechunker`] - Stateful engine with `ingest()`/`finish()` API
//! - [`RechunkIter`] - Pull-based iterator over a [`std::io::Read`] source

mod engine;
mod iter;

pub use engine::{Rechunker, rechunk_bytes};
pub use iter::RechunkIter;
