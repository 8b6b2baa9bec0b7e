//! A fixed-capacity byte container with position and limit cursors.

use bytes::{Buf, Bytes};
use std::fmt;

/// A byte container with position and limit cursors over fixed-capacity
/// storage.
///
/// # Buffer Layout
///
/// ```text
/// [0...........position...........limit...........capacity]
///  ^            ^                  ^                ^
///  |            |                  |                |
///  storage      next read/write    end of window    end of storage
///  start
/// ```
///
/// Relative writes (`put_*`) store at `position` and advance it; relative
/// reads (`get_*`) load from `position` and advance it. A buffer is written
/// with `limit == capacity`, then [`Buffer::flip`]ped so the readable window
/// covers exactly the bytes written.
///
/// # Invariants
///
/// - `position <= limit <= capacity`
/// - Capacity is fixed at allocation; a `Buffer` never grows.
///
/// Writing past `limit` panics, per the same contract as `bytes::BufMut`.
/// Check [`Buffer::remaining`] before writing variable-length data.
pub struct Buffer {
    data: Vec<u8>,
    position: usize,
    limit: usize,
}

impl Buffer {
    /// Allocate a zero-filled buffer with the given capacity.
    ///
    /// The buffer is ready for writing: position 0, limit == capacity.
    pub fn allocate(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            position: 0,
            limit: capacity,
        }
    }

    /// Wrap existing bytes in a buffer ready for reading.
    ///
    /// Position is 0 and the limit covers all of `data`.
    pub fn wrap(data: Vec<u8>) -> Self {
        let limit = data.len();
        Self {
            data,
            position: 0,
            limit,
        }
    }

    /// Returns the fixed capacity of the underlying storage.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the current position cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Set the position cursor.
    ///
    /// # Panics
    ///
    /// Panics if `position > limit`.
    pub fn set_position(&mut self, position: usize) {
        assert!(position <= self.limit, "position exceeds limit");
        self.position = position;
    }

    /// Returns the current limit cursor.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Set the limit cursor. The position is clamped to the new limit.
    ///
    /// # Panics
    ///
    /// Panics if `limit > capacity`.
    pub fn set_limit(&mut self, limit: usize) {
        assert!(limit <= self.capacity(), "limit exceeds capacity");
        self.limit = limit;
        self.position = self.position.min(limit);
    }

    /// Returns the number of bytes between position and limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if any bytes remain between position and limit.
    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Flip the buffer from writing to reading: the limit moves to the
    /// current position and the position resets to 0.
    pub fn flip(&mut self) -> &mut Self {
        self.limit = self.position;
        self.position = 0;
        self
    }

    /// Reset the position to 0, leaving the limit in place.
    pub fn rewind(&mut self) -> &mut Self {
        self.position = 0;
        self
    }

    /// Reset the cursors for a fresh write: position 0, limit == capacity.
    ///
    /// The contents are not zeroed; a cleared buffer exposes nothing until
    /// written because the readable window is derived from the cursors.
    pub fn clear(&mut self) -> &mut Self {
        self.position = 0;
        self.limit = self.capacity();
        self
    }

    /// Write one byte at the position and advance it.
    ///
    /// # Panics
    ///
    /// Panics if no bytes remain.
    pub fn put_u8(&mut self, value: u8) {
        assert!(self.has_remaining(), "cannot write past limit");
        self.data[self.position] = value;
        self.position += 1;
    }

    /// Write a big-endian `u16` at the position and advance it.
    ///
    /// # Panics
    ///
    /// Panics if fewer than 2 bytes remain.
    pub fn put_u16(&mut self, value: u16) {
        self.put_slice(&value.to_be_bytes());
    }

    /// Write a slice at the position and advance it.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `src.len()` bytes remain.
    pub fn put_slice(&mut self, src: &[u8]) {
        assert!(src.len() <= self.remaining(), "cannot write past limit");
        self.data[self.position..self.position + src.len()].copy_from_slice(src);
        self.position += src.len();
    }

    /// Read one byte at the position and advance it.
    ///
    /// # Panics
    ///
    /// Panics if no bytes remain.
    pub fn get_u8(&mut self) -> u8 {
        assert!(self.has_remaining(), "cannot read past limit");
        let value = self.data[self.position];
        self.position += 1;
        value
    }

    /// Read `len` bytes at the position and advance it.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `len` bytes remain.
    pub fn get_slice(&mut self, len: usize) -> &[u8] {
        assert!(len <= self.remaining(), "cannot read past limit");
        let start = self.position;
        self.position += len;
        &self.data[start..start + len]
    }

    /// Returns the readable window (`position..limit`) as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.position..self.limit]
    }

    /// Returns the readable window (`position..limit`) as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[self.position..self.limit]
    }

    /// Consume the buffer, returning the readable window as `Bytes` without
    /// copying.
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.data).slice(self.position..self.limit)
    }
}

impl Buf for Buffer {
    fn remaining(&self) -> usize {
        self.limit - self.position
    }

    fn chunk(&self) -> &[u8] {
        self.as_slice()
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= Buffer::remaining(self),
            "cannot advance past end of buffer"
        );
        self.position += cnt;
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<Buffer> for Bytes {
    fn from(buffer: Buffer) -> Self {
        buffer.freeze()
    }
}

// Equality compares the readable windows, not the backing storage.
impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Buffer {}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate() {
        let buffer = Buffer::allocate(16);
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(buffer.position(), 0);
        assert_eq!(buffer.limit(), 16);
        assert_eq!(buffer.remaining(), 16);
    }

    #[test]
    fn test_wrap() {
        let mut buffer = Buffer::wrap(vec![1, 2, 3]);
        assert_eq!(buffer.remaining(), 3);
        assert_eq!(buffer.get_u8(), 1);
        assert_eq!(buffer.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_put_flip_get() {
        let mut buffer = Buffer::allocate(8);
        buffer.put_u8(0xAB);
        buffer.put_u16(0x0102);
        buffer.flip();

        assert_eq!(buffer.remaining(), 3);
        assert_eq!(buffer.get_u8(), 0xAB);
        assert_eq!(buffer.get_slice(2), &[0x01, 0x02]);
        assert!(!buffer.has_remaining());
    }

    #[test]
    fn test_put_slice() {
        let mut buffer = Buffer::allocate(8);
        buffer.put_slice(b"abc");
        buffer.flip();
        assert_eq!(buffer.as_slice(), b"abc");
    }

    #[test]
    #[should_panic(expected = "cannot write past limit")]
    fn test_put_past_limit() {
        let mut buffer = Buffer::allocate(1);
        buffer.put_u8(1);
        buffer.put_u8(2);
    }

    #[test]
    #[should_panic(expected = "cannot read past limit")]
    fn test_get_past_limit() {
        let mut buffer = Buffer::allocate(4);
        buffer.flip();
        buffer.get_u8();
    }

    #[test]
    fn test_clear_resets_cursors() {
        let mut buffer = Buffer::allocate(4);
        buffer.put_slice(&[1, 2, 3]);
        buffer.flip();
        buffer.clear();

        assert_eq!(buffer.position(), 0);
        assert_eq!(buffer.limit(), 4);
        assert_eq!(buffer.remaining(), 4);
    }

    #[test]
    fn test_rewind() {
        let mut buffer = Buffer::wrap(vec![7, 8]);
        assert_eq!(buffer.get_u8(), 7);
        buffer.rewind();
        assert_eq!(buffer.get_u8(), 7);
    }

    #[test]
    fn test_set_limit_clamps_position() {
        let mut buffer = Buffer::allocate(8);
        buffer.set_position(6);
        buffer.set_limit(4);
        assert_eq!(buffer.position(), 4);
    }

    #[test]
    fn test_set_position_restore() {
        let mut buffer = Buffer::allocate(8);
        buffer.put_slice(&[1, 2, 3]);
        let mark = buffer.position();
        buffer.put_slice(&[4, 5]);
        buffer.set_position(mark);
        assert_eq!(buffer.position(), 3);
    }

    #[test]
    fn test_buf_impl() {
        let mut buffer = Buffer::wrap(vec![1, 2, 3, 4]);
        assert_eq!(Buf::remaining(&buffer), 4);
        assert_eq!(Buf::chunk(&buffer), &[1, 2, 3, 4]);
        Buf::advance(&mut buffer, 2);
        assert_eq!(Buf::chunk(&buffer), &[3, 4]);
    }

    #[test]
    fn test_freeze_is_window() {
        let mut buffer = Buffer::allocate(8);
        buffer.put_slice(b"hello");
        buffer.flip();
        buffer.get_u8();

        let bytes = buffer.freeze();
        assert_eq!(bytes.as_ref(), b"ello");
    }

    #[test]
    fn test_equality_is_window_relative() {
        let mut x = Buffer::allocate(8);
        x.put_slice(b"abc");
        x.flip();

        let y = Buffer::wrap(b"abc".to_vec());
        assert_eq!(x, y);

        let mut z = Buffer::wrap(b"zabc".to_vec());
        z.get_u8();
        assert_eq!(x, z);
    }
}
