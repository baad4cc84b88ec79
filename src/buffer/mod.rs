//! Internal buffer management for in-progress output chunks.
//!
//! A [`PendingBuffer`] is one output chunk that has not been filled yet. It
//! is an implementation detail and not part of the public API.

mod pending;

pub(crate) use pending::PendingBuffer;
