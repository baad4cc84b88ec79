//! Fixed-capacity, fill-counted output buffer.

use bytes::Bytes;

use crate::error::RechunkError;

/// An output chunk being assembled.
///
/// The backing storage is allocated once with the full target capacity, so
/// filling it never reallocates. The fill count is the number of valid bytes
/// at the front.
#[derive(Debug)]
pub(crate) struct PendingBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl PendingBuffer {
    /// Allocates an empty buffer able to hold exactly `capacity` bytes.
    ///
    /// Fails with [`RechunkError::AllocationFailed`] instead of aborting when
    /// the allocator cannot provide `capacity` bytes.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, RechunkError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| RechunkError::AllocationFailed { size: capacity })?;
        Ok(Self { data, capacity })
    }

    /// Number of valid bytes written so far.
    pub(crate) fn filled(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes that still fit.
    pub(crate) fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies as much of `src` as fits and returns the number of bytes taken.
    pub(crate) fn fill_from(&mut self, src: &[u8]) -> usize {
        let n = self.remaining().min(src.len());
        self.data.extend_from_slice(&src[..n]);
        n
    }

    /// Consumes the buffer and returns its valid bytes.
    ///
    /// A partially filled buffer yields only its first `filled()` bytes.
    pub(crate) fn freeze(self) -> Bytes {
        Bytes::from(self.data)
    }
}
