//! Byte-cursor primitives for agrodoc document buffers.
//!
//! Every navigation or mutation pass over a document opens a fresh [`Reader`]
//! (and, for mutation, a fresh [`Writer`]) scoped to that call. Neither type
//! is pooled or shared; dropping them releases everything.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
