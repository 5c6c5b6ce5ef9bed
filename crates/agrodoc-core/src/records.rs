//! Ordered collections of sibling records extracted from an array field.

use std::sync::Arc;

use agrodoc_json_token::{Scanner, Token};

use crate::kind::{DocKind, KindRegistry};
use crate::{Component, DocError};

/// The sibling sub-objects of one array field, e.g. the daily entries of a
/// weather component.
///
/// The collection owns an independent copy of the array buffer; records have
/// no identity beyond their position and no link back to the parent
/// component. Parents rebuild the collection on every request; nothing is
/// cached.
#[derive(Debug, Clone)]
pub struct RecordCollection {
    buf: Vec<u8>,
    registry: Arc<KindRegistry>,
}

impl RecordCollection {
    pub(crate) fn new(buf: Vec<u8>, registry: Arc<KindRegistry>) -> Self {
        Self { buf, registry }
    }

    /// Wraps a raw array buffer directly.
    pub fn from_bytes(buf: Vec<u8>) -> Self {
        Self::new(buf, Arc::new(KindRegistry::default()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Iterates the element objects in order, wrapping each as a
    /// [`Component`] of kind [`DocKind::Record`]. Elements that are not
    /// objects are skipped with a diagnostic.
    pub fn iter(&self) -> RecordIter<'_> {
        RecordIter {
            scanner: Scanner::new(&self.buf),
            registry: &self.registry,
            started: false,
            done: false,
        }
    }

    /// Number of object records, counted by scanning.
    pub fn len(&self) -> usize {
        self.iter().filter(Result::is_ok).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = Result<Component, DocError>;
    type IntoIter = RecordIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the records of a [`RecordCollection`].
///
/// A structural error in the underlying buffer is yielded once, after which
/// the iterator is exhausted.
pub struct RecordIter<'a> {
    scanner: Scanner<'a>,
    registry: &'a Arc<KindRegistry>,
    started: bool,
    done: bool,
}

impl Iterator for RecordIter<'_> {
    type Item = Result<Component, DocError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            match self.scanner.next() {
                Ok(Some(Token::ArrayStart)) => {}
                // Not an array buffer: nothing to yield.
                Ok(_) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        loop {
            match self.scanner.next() {
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Ok(Some(Token::ArrayEnd)) if self.scanner.depth() == 0 => {
                    self.done = true;
                    return None;
                }
                Ok(Some(Token::ObjectStart)) => {
                    let start = self.scanner.token_start();
                    match self.scanner.finish_to_depth(1) {
                        Ok(end) => {
                            let bytes = self.scanner.input()[start..end].to_vec();
                            return Some(Ok(Component::from_bytes(bytes, DocKind::Record)
                                .with_registry(Arc::clone(self.registry))));
                        }
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e.into()));
                        }
                    }
                }
                Ok(Some(Token::ArrayStart)) => {
                    tracing::debug!("skipping nested array record element");
                    if let Err(e) = self.scanner.finish_to_depth(1) {
                        self.done = true;
                        return Some(Err(e.into()));
                    }
                }
                Ok(Some(_)) => {
                    tracing::debug!("skipping non-object record element");
                }
            }
        }
    }
}
