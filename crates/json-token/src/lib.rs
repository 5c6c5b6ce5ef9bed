//! Streaming JSON token layer for agrodoc document buffers.
//!
//! A [`Scanner`] pulls one [`Token`] at a time out of a UTF-8 JSON buffer.
//! Every token carries the exact source bytes it was read from, so callers
//! that rewrite a buffer can copy untouched structure verbatim instead of
//! re-serializing it. The [`Emitter`] is the matching write side: it appends
//! JSON text (raw spans, string fields, or whole [`serde_json::Value`]s) to
//! an output buffer.
//!
//! Malformed input surfaces as a [`TokenError`]; the scanner never recovers
//! mid-buffer.

mod emitter;
mod error;
mod escape;
mod scanner;
mod token;

pub use emitter::Emitter;
pub use error::TokenError;
pub use escape::{escape_into, find_ending_quote, unescape};
pub use scanner::Scanner;
pub use token::Token;
