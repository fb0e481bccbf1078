//! Line buffer for console input

use crate::config::INPUT_CAPACITY;

/// Placeholder left behind by a backspace
pub const ERASED: u8 = b'_';

/// Bounded input line with a write cursor.
///
/// Input past capacity is dropped; backspace at the start is a no-op.
pub struct LineBuffer<const N: usize = INPUT_CAPACITY> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    /// Append a byte at the cursor.
    ///
    /// Returns `false` if the buffer is full and the byte was dropped.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < N {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Step the cursor back and mark the freed slot as erased.
    ///
    /// Returns `false` if there was nothing to erase.
    pub fn backspace(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            self.buf[self.len] = ERASED;
            true
        } else {
            false
        }
    }

    /// Empty the buffer and wipe its contents
    pub fn clear(&mut self) {
        self.buf = [0u8; N];
        self.len = 0;
    }

    /// Get buffer as string slice (empty if not valid UTF-8)
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    /// Get raw bytes up to the cursor
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Cursor position
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Nothing but whitespace typed so far
    pub fn is_blank(&self) -> bool {
        self.as_bytes().iter().all(u8::is_ascii_whitespace)
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Byte stored at `idx`, including erased slots past the cursor
    pub fn slot(&self, idx: usize) -> Option<u8> {
        self.buf.get(idx).copied()
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
