//! Read-only streaming lookups over a document buffer.
//!
//! Each function opens its own scanner for the duration of one call. Field
//! names are matched at *any* nesting depth, which is wider than the
//! mutator's top-level-only rule; see the note on [`scalar`]. Lookup misses
//! and wrong-shape values are not errors: they fall back to `None` or the
//! canonical empty buffers, with a diagnostic.

use agrodoc_json_token::{Scanner, Token, TokenError};

use crate::defaults::{blank_array, blank_object};
use crate::DocError;

/// Finds the first field named `key` and returns its value as text.
///
/// String values are unescaped; numbers and booleans return their literal
/// text; `null` and structured values yield `None`. The scan stops at the
/// first match.
///
/// Note: the match is depth-agnostic: a nested `wst_id` is found through its
/// enclosing `weather` object. Mutation deliberately does not share this
/// behavior ([`crate::mutator::update`] touches depth-1 fields only).
pub fn scalar(buf: &[u8], key: &str) -> Result<Option<String>, DocError> {
    let mut scanner = Scanner::new(buf);
    while let Some(token) = scanner.next()? {
        let Token::FieldName { text, .. } = token else {
            continue;
        };
        if text != key {
            continue;
        }
        return match scanner.next()? {
            None => Err(TokenError::Eof(scanner.pos()).into()),
            Some(Token::Str { text, .. }) => Ok(Some(text.into_owned())),
            Some(Token::Num { raw }) => Ok(Some(String::from_utf8_lossy(raw).into_owned())),
            Some(Token::Bool(b)) => Ok(Some(if b { "true" } else { "false" }.to_string())),
            Some(Token::Null) => {
                tracing::debug!(key, "field is null, no scalar value");
                Ok(None)
            }
            Some(_) => {
                tracing::debug!(key, "field holds a structure, not a scalar");
                Ok(None)
            }
        };
    }
    Ok(None)
}

/// Returns the verbatim bytes of the array stored under `key`, or the
/// canonical empty array when the key is missing or holds a different shape.
pub fn raw_array(buf: &[u8], key: &str) -> Result<Vec<u8>, DocError> {
    let mut scanner = Scanner::new(buf);
    while let Some(token) = scanner.next()? {
        let Token::FieldName { text, .. } = token else {
            continue;
        };
        if text != key {
            continue;
        }
        let outer = scanner.depth();
        return match scanner.next()? {
            None => Err(TokenError::Eof(scanner.pos()).into()),
            Some(Token::ArrayStart) => {
                let start = scanner.token_start();
                let end = scanner.finish_to_depth(outer)?;
                Ok(buf[start..end].to_vec())
            }
            Some(_) => {
                tracing::error!(key, "key does not start an array");
                Ok(blank_array())
            }
        };
    }
    Ok(blank_array())
}

/// Returns the verbatim bytes of the object stored under `key`, or the
/// canonical empty object when the key is missing or holds a different shape.
pub fn raw_object(buf: &[u8], key: &str) -> Result<Vec<u8>, DocError> {
    let mut scanner = Scanner::new(buf);
    while let Some(token) = scanner.next()? {
        let Token::FieldName { text, .. } = token else {
            continue;
        };
        if text != key {
            continue;
        }
        let outer = scanner.depth();
        return match scanner.next()? {
            None => Err(TokenError::Eof(scanner.pos()).into()),
            Some(Token::ObjectStart) => {
                let start = scanner.token_start();
                let end = scanner.finish_to_depth(outer)?;
                Ok(buf[start..end].to_vec())
            }
            Some(_) => {
                tracing::error!(key, "key does not start an object");
                Ok(blank_object())
            }
        };
    }
    Ok(blank_object())
}
