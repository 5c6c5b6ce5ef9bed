//! Content-address digests for document buffers.

use std::fmt;

use xxhash_rust::xxh64::xxh64;

/// Deterministic fixed-width digest of a buffer's raw bytes.
///
/// Two components with the same bytes share the same id, which is what
/// dataset deduplication keys on. The digest covers the buffer exactly as
/// stored; it changes whenever a mutation changes the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(u64);

impl ContentId {
    pub fn of(bytes: &[u8]) -> Self {
        Self(xxh64(bytes, 0))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_content_sensitive() {
        let a = ContentId::of(br#"{"wst_id":"UFGA"}"#);
        let b = ContentId::of(br#"{"wst_id":"UFGA"}"#);
        let c = ContentId::of(br#"{"wst_id":"UFGB"}"#);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn displays_as_fixed_width_hex() {
        let id = ContentId::of(b"{}");
        assert_eq!(id.to_string().len(), 16);
        assert_eq!(id.to_string(), format!("{:016x}", id.as_u64()));
    }
}
