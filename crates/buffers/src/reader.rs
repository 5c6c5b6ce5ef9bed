//! Byte reader with cursor tracking.

/// A read cursor over a borrowed byte slice.
///
/// The reader keeps the current position and exposes byte-level access; all
/// range checking is the caller's job via [`Reader::size`].
///
/// # Example
///
/// ```
/// use agrodoc_buffers::Reader;
///
/// let mut reader = Reader::new(b"{}");
/// assert_eq!(reader.peek(), b'{');
/// assert_eq!(reader.u8(), b'{');
/// assert_eq!(reader.size(), 1);
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over the full slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Number of unread bytes remaining.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// True when the cursor has reached the end.
    pub fn is_empty(&self) -> bool {
        self.x >= self.end
    }

    /// Current byte without advancing the cursor.
    pub fn peek(&self) -> u8 {
        self.uint8[self.x]
    }

    /// Advances the cursor by `length` bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Reads one byte and advances.
    pub fn u8(&mut self) -> u8 {
        let b = self.uint8[self.x];
        self.x += 1;
        b
    }

    /// Returns the next `size` bytes and advances past them.
    pub fn buf(&mut self, size: usize) -> &'a [u8] {
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        bin
    }
}
