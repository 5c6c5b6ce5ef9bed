//! agrodoc-core: streaming navigation and mutation of scientific-dataset
//! JSON document buffers.
//!
//! A dataset document (an experiment, a weather station record, a soil
//! profile) lives as a single JSON object in a byte buffer. Instead of
//! materializing a parse tree, every lookup or edit is one pass of a token
//! scanner over that buffer: reads copy matched substructure out verbatim,
//! and writes produce a new buffer in which every untouched byte is identical
//! to the input.
//!
//! The entry point is [`Component`], which owns a buffer together with its
//! [`DocKind`] tag and a dirty flag, and exposes the chainable read/mutate
//! surface. Mutations are gated by the [`KindRegistry`]: a field belonging to
//! a different document kind is silently skipped (with a diagnostic), never
//! an error.

mod component;
mod defaults;
mod error;
mod event;
mod hash;
mod kind;
pub mod mutator;
pub mod navigator;
mod records;

pub use component::Component;
pub use defaults::{blank_array, blank_object, BLANK_ARRAY, BLANK_OBJECT};
pub use error::DocError;
pub use event::{events_sorted, Event, EventKind};
pub use hash::ContentId;
pub use kind::{DocKind, KindRegistry, IDENTITY_KEYS};
pub use records::{RecordCollection, RecordIter};
