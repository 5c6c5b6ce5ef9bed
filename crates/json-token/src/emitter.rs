//! JSON text emitter over a [`Writer`] buffer.

use agrodoc_buffers::Writer;

use crate::escape::escape_into;

/// The write cursor of a rewrite pass.
///
/// Mixes three kinds of output: raw input spans copied verbatim
/// ([`Emitter::raw`]), freshly written string fields, and whole
/// [`serde_json::Value`]s encoded in canonical minimal form (no insignificant
/// whitespace, insertion order preserved).
pub struct Emitter {
    writer: Writer,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writer: Writer::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    /// Copies bytes through unchanged.
    pub fn raw(&mut self, bytes: &[u8]) {
        self.writer.buf(bytes);
    }

    pub fn comma(&mut self) {
        self.writer.u8(b',');
    }

    pub fn begin_object(&mut self) {
        self.writer.u8(b'{');
    }

    pub fn end_object(&mut self) {
        self.writer.u8(b'}');
    }

    pub fn begin_array(&mut self) {
        self.writer.u8(b'[');
    }

    pub fn end_array(&mut self) {
        self.writer.u8(b']');
    }

    /// Writes a quoted, escaped JSON string.
    pub fn string(&mut self, s: &str) {
        self.writer.u8(b'"');
        escape_into(s, &mut self.writer);
        self.writer.u8(b'"');
    }

    /// Writes `"key":` ready for a value.
    pub fn field_name(&mut self, key: &str) {
        self.string(key);
        self.writer.u8(b':');
    }

    /// Writes a complete `"key":"value"` pair.
    pub fn str_field(&mut self, key: &str, value: &str) {
        self.field_name(key);
        self.string(value);
    }

    /// Encodes a full `serde_json::Value` in canonical minimal form.
    pub fn value(&mut self, value: &serde_json::Value) {
        match value {
            serde_json::Value::Null => self.writer.ascii("null"),
            serde_json::Value::Bool(true) => self.writer.ascii("true"),
            serde_json::Value::Bool(false) => self.writer.ascii("false"),
            serde_json::Value::Number(n) => self.writer.ascii(&n.to_string()),
            serde_json::Value::String(s) => self.string(s),
            serde_json::Value::Array(arr) => {
                self.begin_array();
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.value(item);
                }
                self.end_array();
            }
            serde_json::Value::Object(obj) => {
                self.begin_object();
                for (i, (key, item)) in obj.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.field_name(key);
                    self.value(item);
                }
                self.end_object();
            }
        }
    }

    /// Consumes the emitter and returns the output buffer.
    pub fn finish(self) -> Vec<u8> {
        self.writer.into_vec()
    }
}
