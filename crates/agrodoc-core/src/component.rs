//! The component wrapper: a document buffer plus its dirty flag and kind.

use std::fmt;
use std::sync::Arc;

use agrodoc_buffers::Writer;
use agrodoc_json_token::Emitter;

use crate::defaults::blank_object;
use crate::hash::ContentId;
use crate::kind::{DocKind, KindRegistry};
use crate::records::RecordCollection;
use crate::{mutator, navigator, DocError};

/// A wrapped dataset document.
///
/// Owns the JSON buffer, a dirty flag that turns true the first time a
/// mutation actually changes the buffer (and never resets), and the kind tag
/// fixed at construction. Mutation replaces the buffer in place, so callers
/// that need the old bytes must copy them first.
///
/// Mutation methods return `&mut Self` so calls chain:
///
/// ```
/// use agrodoc_core::{Component, DocKind};
///
/// let mut weather = Component::new(DocKind::Weather);
/// weather
///     .update("wst_id", "UFGA")?
///     .update("wst_name", "Gainesville")?;
/// assert!(weather.is_dirty());
/// # Ok::<(), agrodoc_core::DocError>(())
/// ```
///
/// No internal synchronization: a component must not be mutated from more
/// than one thread at a time.
#[derive(Debug, Clone)]
pub struct Component {
    buf: Vec<u8>,
    dirty: bool,
    kind: DocKind,
    registry: Arc<KindRegistry>,
}

impl Component {
    /// A blank component (`{}`) of the given kind.
    pub fn new(kind: DocKind) -> Self {
        Self::from_bytes(blank_object(), kind)
    }

    /// Wraps an existing buffer. The buffer must hold a single well-formed
    /// JSON object; malformed content surfaces as an error on first use.
    pub fn from_bytes(buf: Vec<u8>, kind: DocKind) -> Self {
        Self {
            buf,
            dirty: false,
            kind,
            registry: Arc::new(KindRegistry::default()),
        }
    }

    /// Encodes a `serde_json::Value` object to a canonical buffer and wraps
    /// it.
    pub fn from_value(value: &serde_json::Value, kind: DocKind) -> Result<Self, DocError> {
        if !value.is_object() {
            return Err(DocError::NotAnObject);
        }
        let mut out = Emitter::new();
        out.value(value);
        Ok(Self::from_bytes(out.finish(), kind))
    }

    /// Replaces the kind registry consulted by mutations and subcomponent
    /// kind derivation.
    pub fn with_registry(mut self, registry: Arc<KindRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn kind(&self) -> DocKind {
        self.kind
    }

    /// Whether any mutation has changed the buffer since construction.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The raw document bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Content-identity digest of the raw buffer, for deduplication.
    pub fn content_id(&self) -> ContentId {
        ContentId::of(&self.buf)
    }

    /// Copies the raw buffer into a caller-supplied output sink. The caller
    /// owns the sink's lifecycle.
    pub fn write_to(&self, out: &mut Writer) {
        out.buf(&self.buf);
    }

    /// Scalar lookup; `None` when the key is absent or not scalar.
    pub fn value(&self, key: &str) -> Result<Option<String>, DocError> {
        navigator::scalar(&self.buf, key)
    }

    /// Scalar lookup with a caller-supplied default.
    pub fn value_or(&self, key: &str, default: &str) -> Result<String, DocError> {
        Ok(self
            .value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// The verbatim array buffer under `key` (canonical `[]` when absent).
    pub fn raw_records(&self, key: &str) -> Result<Vec<u8>, DocError> {
        navigator::raw_array(&self.buf, key)
    }

    /// The sibling records stored under the array field `key`. Rebuilt on
    /// every call; the collection is an independent copy with no link back to
    /// this component.
    pub fn records(&self, key: &str) -> Result<RecordCollection, DocError> {
        Ok(RecordCollection::new(
            self.raw_records(key)?,
            Arc::clone(&self.registry),
        ))
    }

    /// The verbatim object buffer under `key` (canonical `{}` when absent).
    pub fn raw_subcomponent(&self, key: &str) -> Result<Vec<u8>, DocError> {
        navigator::raw_object(&self.buf, key)
    }

    /// The nested object under `key`, wrapped as its own component. The
    /// child's kind is re-derived from the key (`Generic` when unknown) and
    /// the child is an independent copy.
    pub fn subcomponent(&self, key: &str) -> Result<Component, DocError> {
        let kind = self.registry.resolve(key);
        Ok(Component::from_bytes(self.raw_subcomponent(key)?, kind)
            .with_registry(Arc::clone(&self.registry)))
    }

    /// Adds or replaces `key` with `value` (written as a JSON string).
    pub fn update(&mut self, key: &str, value: &str) -> Result<&mut Self, DocError> {
        self.apply(key, value, true, false)
    }

    /// Replaces `key` only; adds it only when `add_if_missing` is set.
    pub fn update_if(
        &mut self,
        key: &str,
        value: &str,
        add_if_missing: bool,
    ) -> Result<&mut Self, DocError> {
        self.apply(key, value, add_if_missing, false)
    }

    /// Deletes the top-level field `key`; absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Result<&mut Self, DocError> {
        self.apply(key, "", false, true)
    }

    fn apply(
        &mut self,
        key: &str,
        value: &str,
        add_if_missing: bool,
        remove: bool,
    ) -> Result<&mut Self, DocError> {
        let (buf, changed) = mutator::update(
            &self.buf,
            self.kind,
            &self.registry,
            key,
            value,
            add_if_missing,
            remove,
        )?;
        if changed {
            self.buf = buf;
            self.dirty = true;
        }
        Ok(self)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.buf))
    }
}
