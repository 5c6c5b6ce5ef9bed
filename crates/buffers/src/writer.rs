//! Byte writer with auto-growing capacity.

/// A write cursor that appends to a growable byte buffer.
///
/// # Example
///
/// ```
/// use agrodoc_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(b'{');
/// writer.ascii("\"a\":1");
/// writer.u8(b'}');
/// assert_eq!(writer.into_vec(), b"{\"a\":1}");
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Creates a writer pre-sized for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// True when nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Writes a single byte.
    pub fn u8(&mut self, byte: u8) {
        self.uint8.push(byte);
    }

    /// Writes a byte slice verbatim.
    pub fn buf(&mut self, bytes: &[u8]) {
        self.uint8.extend_from_slice(bytes);
    }

    /// Writes an ASCII string.
    pub fn ascii(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }

    /// Writes a UTF-8 string.
    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }

    /// Consumes the writer and returns the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.uint8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order() {
        let mut w = Writer::with_capacity(8);
        w.u8(b'[');
        w.buf(b"1,2");
        w.utf8("]");
        assert_eq!(w.len(), 5);
        assert_eq!(w.into_vec(), b"[1,2]");
    }
}
