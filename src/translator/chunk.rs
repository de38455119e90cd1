//! Bounded byte chunks
//!
//! Fixed-capacity buffers handed back to the caller after each input byte.
//! Appends never grow the buffer: bytes that don't fit are dropped and the
//! append reports a [`CapacityError`].

use thiserror::Error;

/// Capacity of the chunk sent to the printer per input byte
pub const OUTPUT_CAPACITY: usize = 128;

/// Capacity of the chunk sent back to the host per input byte
pub const RESPONSE_CAPACITY: usize = 32;

/// A bounded buffer rejected one or more bytes
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("chunk full: {dropped} byte(s) dropped at capacity {capacity}")]
pub struct CapacityError {
    /// Total capacity of the buffer
    pub capacity: usize,
    /// Number of bytes that did not fit
    pub dropped: usize,
}

/// Fixed-capacity byte buffer with an explicit length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteChunk<const N: usize> {
    buf: [u8; N],
    len: usize,
}

/// Bytes to write to the physical device
pub type OutputChunk = ByteChunk<OUTPUT_CAPACITY>;

/// Bytes to return to the host
pub type ResponseChunk = ByteChunk<RESPONSE_CAPACITY>;

impl<const N: usize> Default for ByteChunk<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteChunk<N> {
    /// Create an empty chunk
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    /// Total number of bytes the chunk can hold
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of bytes currently held
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes currently held
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a single byte
    pub fn push(&mut self, byte: u8) -> Result<(), CapacityError> {
        if self.len == N {
            return Err(CapacityError {
                capacity: N,
                dropped: 1,
            });
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Append as much of `bytes` as fits
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        let room = N - self.len;
        let taken = bytes.len().min(room);
        self.buf[self.len..self.len + taken].copy_from_slice(&bytes[..taken]);
        self.len += taken;

        if taken < bytes.len() {
            return Err(CapacityError {
                capacity: N,
                dropped: bytes.len() - taken,
            });
        }
        Ok(())
    }

    /// Append `count` copies of `byte`, truncating at capacity
    pub fn push_repeated(&mut self, byte: u8, count: usize) -> Result<(), CapacityError> {
        let room = N - self.len;
        let taken = count.min(room);
        self.buf[self.len..self.len + taken].fill(byte);
        self.len += taken;

        if taken < count {
            return Err(CapacityError {
                capacity: N,
                dropped: count - taken,
            });
        }
        Ok(())
    }
}

impl<const N: usize> AsRef<[u8]> for ByteChunk<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
