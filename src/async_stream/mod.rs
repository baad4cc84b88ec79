//! Async streaming support for re-chunking.
//!
//! Runtime-agnostic adapters built on `futures-io` and `futures-core`:
//!
//! - [`rechunk_async`] - Fixed-size chunk stream from an async reader
//! - [`rechunk_stream`] - Fixed-size chunk stream from a stream of byte blocks
//!
//! Both are pull-based: the source is only read when the consumer polls for
//! a chunk and none is buffered.
//!
//! This module requires the `async-io` feature to be enabled.

mod blocks;
mod stream;

pub use blocks::{Rechunked, rechunk_stream};
pub use stream::{RechunkStream, rechunk_async};
