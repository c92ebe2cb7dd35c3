//! Byte-stream targets.
//!
//! A [`Target`] is the byte cursor an [`Encoder`](crate::Encoder) appends to
//! and a [`Decoder`](crate::Decoder) consumes from. The codec never touches a
//! medium directly; every byte it transfers goes through this trait, so any
//! storage that can satisfy the contract below can carry either format.
//!
//! Three implementations ship with the crate:
//!
//! - [`BufferTarget`]: an in-memory byte vector with a read cursor
//! - [`FileTarget`](crate::FileTarget): an unbuffered file handle
//! - [`BufferedFileTarget`](crate::BufferedFileTarget): a file behind a fixed-size buffer
//!
//! ## Examples
//!
//! ```rust
//! use serde_duplex::{BufferTarget, Target};
//!
//! let mut target = BufferTarget::new();
//! target.write(b"hello").unwrap();
//!
//! let mut head = [0u8; 2];
//! target.read(&mut head).unwrap();
//! assert_eq!(&head, b"he");
//! assert_eq!(target.peek().unwrap(), Some(b'l'));
//! assert_eq!(target.tell(), 2);
//! ```

use crate::{Error, Result};

/// Capability contract for byte media the codec reads from and writes to.
///
/// Writes are append-only. Reads advance a cursor monotonically from the
/// start of the medium. [`Target::context`] is a diagnostic query: it must
/// leave [`Target::tell`] and every subsequent read exactly as they were.
pub trait Target {
    /// Appends `bytes` to the medium.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Fills `buf` completely from the current read position, advancing it.
    ///
    /// Fails with [`Error::Backend`] when fewer than `buf.len()` bytes remain.
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Returns the next unread byte without consuming it, or `None` at end of stream.
    fn peek(&mut self) -> Result<Option<u8>>;

    /// Current read offset from the start of the medium.
    fn tell(&self) -> u64;

    /// Returns up to `before` bytes preceding and up to `after` bytes following
    /// the position `tell() + offset`, as one contiguous slice.
    ///
    /// The centre is clamped to the readable data and the window never extends
    /// past either end of it.
    fn context(&mut self, before: usize, after: usize, offset: i64) -> Result<Vec<u8>>;

    /// True when no more bytes are available to read.
    fn eof(&mut self) -> Result<bool> {
        Ok(self.peek()?.is_none())
    }

    /// Consumes and returns a single byte.
    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read(&mut byte)?;
        Ok(byte[0])
    }
}

/// Computes the `[start, end)` bounds of a context window over `len` readable
/// bytes, with the cursor at `pos`.
pub(crate) fn window_bounds(
    len: u64,
    pos: u64,
    before: usize,
    after: usize,
    offset: i64,
) -> (u64, u64) {
    let center = if offset < 0 {
        pos.saturating_sub(offset.unsigned_abs())
    } else {
        pos.saturating_add(offset as u64)
    }
    .min(len);
    let start = center.saturating_sub(before as u64);
    let end = center.saturating_add(after as u64).min(len);
    (start, end)
}

/// In-memory target backed by a growable byte vector.
///
/// Writes append to the vector; reads consume from an independent cursor
/// that starts at the beginning, so a buffer can be encoded into and then
/// decoded from without copying.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferTarget {
    data: Vec<u8>,
    read_pos: usize,
}

impl BufferTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BufferTarget {
            data: Vec::with_capacity(capacity),
            read_pos: 0,
        }
    }

    /// Wraps existing bytes for decoding; the read cursor starts at zero.
    #[must_use]
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        BufferTarget {
            data: data.into(),
            read_pos: 0,
        }
    }

    /// All bytes written so far, including those already read.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Bytes not yet consumed by reads.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.read_pos..]
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Moves the read cursor back to the start of the buffer.
    pub fn rewind(&mut self) {
        self.read_pos = 0;
    }
}

impl From<Vec<u8>> for BufferTarget {
    fn from(data: Vec<u8>) -> Self {
        BufferTarget::from_bytes(data)
    }
}

impl Target for BufferTarget {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let available = self.data.len() - self.read_pos;
        if buf.len() > available {
            return Err(Error::backend_at(
                self.read_pos as u64,
                &format!(
                    "buffer underflow: needed {} bytes, {} available",
                    buf.len(),
                    available
                ),
            ));
        }
        let end = self.read_pos + buf.len();
        buf.copy_from_slice(&self.data[self.read_pos..end]);
        self.read_pos = end;
        Ok(())
    }

    #[inline]
    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.data.get(self.read_pos).copied())
    }

    #[inline]
    fn tell(&self) -> u64 {
        self.read_pos as u64
    }

    fn context(&mut self, before: usize, after: usize, offset: i64) -> Result<Vec<u8>> {
        let (start, end) = window_bounds(
            self.data.len() as u64,
            self.read_pos as u64,
            before,
            after,
            offset,
        );
        Ok(self.data[start as usize..end as usize].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(bytes: &[u8]) -> BufferTarget {
        let mut target = BufferTarget::new();
        target.write(bytes).unwrap();
        target
    }

    #[test]
    fn test_read_advances_cursor() {
        let mut target = filled(b"abcdef");
        let mut buf = [0u8; 3];
        target.read(&mut buf).unwrap();
        assert_eq!(&buf, b"abc");
        assert_eq!(target.tell(), 3);
        assert_eq!(target.remaining(), b"def");
    }

    #[test]
    fn test_short_read_fails_without_consuming() {
        let mut target = filled(b"ab");
        let mut buf = [0u8; 3];
        let err = target.read(&mut buf).unwrap_err();
        assert!(err.is_backend());
        assert_eq!(err.position(), Some(0));
        assert_eq!(target.tell(), 0);
    }

    #[test]
    fn test_peek_and_eof() {
        let mut target = filled(b"x");
        assert_eq!(target.peek().unwrap(), Some(b'x'));
        assert!(!target.eof().unwrap());
        assert_eq!(target.read_byte().unwrap(), b'x');
        assert_eq!(target.peek().unwrap(), None);
        assert!(target.eof().unwrap());
    }

    #[test]
    fn test_empty_target_is_eof() {
        let mut target = BufferTarget::new();
        assert!(target.eof().unwrap());
        assert!(target.context(10, 10, 0).unwrap().is_empty());
    }

    #[test]
    fn test_context_is_non_destructive() {
        let mut target = filled(b"0123456789abcdefghij");
        let mut buf = [0u8; 12];
        target.read(&mut buf).unwrap();

        assert_eq!(target.context(4, 0, 0).unwrap(), b"89ab");
        assert_eq!(target.context(0, 4, 1).unwrap(), b"defg");
        assert_eq!(target.context(2, 2, 0).unwrap(), b"abcd");
        assert_eq!(target.tell(), 12);
        assert_eq!(target.peek().unwrap(), Some(b'c'));
    }

    #[test]
    fn test_context_clamps_to_bounds() {
        let mut target = filled(b"abcdef");
        assert_eq!(target.context(10, 0, 0).unwrap(), b"");
        assert_eq!(target.context(0, 10, 0).unwrap(), b"abcdef");
        assert_eq!(target.context(10, 10, 100).unwrap(), b"abcdef");
        assert_eq!(target.context(10, 10, -100).unwrap(), b"abcdef");

        target.rewind();
        let mut buf = [0u8; 5];
        target.read(&mut buf).unwrap();
        assert_eq!(target.context(10, 10, 0).unwrap(), b"abcdef");
        assert_eq!(target.context(1, 1, -2).unwrap(), b"cd");
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(window_bounds(20, 12, 4, 0, 0), (8, 12));
        assert_eq!(window_bounds(20, 12, 0, 4, 1), (13, 17));
        assert_eq!(window_bounds(20, 3, 10, 0, -5), (0, 0));
        assert_eq!(window_bounds(20, 18, 0, 10, 5), (20, 20));
    }
}
