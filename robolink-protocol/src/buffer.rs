//! Fixed-capacity receive buffer
//!
//! Holds the body of the frame currently being assembled. The length of the
//! underlying vector is the write cursor: bytes `[0, cursor)` are the body,
//! an empty buffer means no frame content yet.

use heapless::Vec;

/// Receive buffer capacity in bytes
pub const RX_BUFFER_SIZE: usize = 128;

/// Largest frame body the buffer accepts
///
/// One slot of the capacity is kept for the terminator the host side
/// reserves, so a body may hold `RX_BUFFER_SIZE - 1` bytes.
pub const MAX_FRAME_BODY: usize = RX_BUFFER_SIZE - 1;

/// Bounded byte store with a write cursor
#[derive(Debug, Clone, Default)]
pub struct RxBuffer {
    bytes: Vec<u8, MAX_FRAME_BODY>,
}

impl RxBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a byte at the cursor
    ///
    /// Returns the rejected byte when the buffer is already full. The
    /// contents are left untouched in that case; the caller decides whether
    /// to discard the frame.
    pub fn push(&mut self, byte: u8) -> Result<(), u8> {
        self.bytes.push(byte)
    }

    /// Reset the cursor to zero
    ///
    /// Stale bytes are not zeroed; reads are always bounded by the cursor.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Current write cursor (number of stored bytes)
    pub fn cursor(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check whether another byte would overflow
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// The stored bytes `[0, cursor)`
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_idle() {
        let buffer = RxBuffer::new();
        assert_eq!(buffer.cursor(), 0);
        assert!(buffer.is_empty());
        assert!(buffer.as_slice().is_empty());
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut buffer = RxBuffer::new();
        buffer.push(b'P').unwrap();
        buffer.push(b'I').unwrap();
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.as_slice(), b"PI");
    }

    #[test]
    fn test_push_rejects_when_full() {
        let mut buffer = RxBuffer::new();
        for _ in 0..MAX_FRAME_BODY {
            buffer.push(b'x').unwrap();
        }
        assert!(buffer.is_full());
        assert_eq!(buffer.push(b'y'), Err(b'y'));
        assert_eq!(buffer.cursor(), MAX_FRAME_BODY);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut buffer = RxBuffer::new();
        buffer.push(b'a').unwrap();
        buffer.clear();
        assert_eq!(buffer.cursor(), 0);
        buffer.push(b'b').unwrap();
        assert_eq!(buffer.as_slice(), b"b");
    }
}
