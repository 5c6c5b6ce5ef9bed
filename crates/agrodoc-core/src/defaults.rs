//! Canonical empty buffers used as lookup fallbacks.

/// The canonical empty-object buffer.
pub const BLANK_OBJECT: &[u8] = b"{}";

/// The canonical empty-array buffer.
pub const BLANK_ARRAY: &[u8] = b"[]";

/// A fresh owned empty-object buffer, used when a component is constructed
/// without content and as the not-found/wrong-shape fallback for object
/// lookups.
pub fn blank_object() -> Vec<u8> {
    BLANK_OBJECT.to_vec()
}

/// A fresh owned empty-array buffer, the fallback for array lookups.
pub fn blank_array() -> Vec<u8> {
    BLANK_ARRAY.to_vec()
}
