//! Single-pass add/replace/remove of a top-level field.
//!
//! The pass walks one read cursor over the input and one write cursor over
//! the output, with the scanner's nesting counter deciding what may match:
//! only depth-1 field names are ever touched, so a nested field with the same
//! name is copied through untouched. Untouched input is copied through a
//! watermark: byte ranges the pass never rewrites are reproduced verbatim,
//! including spacing and unknown keys.

use agrodoc_json_token::{Emitter, Scanner, Token, TokenError};

use crate::kind::{DocKind, KindRegistry};
use crate::DocError;

/// Rewrites `buf`, producing the new buffer and whether anything changed.
///
/// * `remove` wins over the other arguments: the matched field is deleted and
///   `new_value` ignored.
/// * Otherwise the matched field's value is replaced by `new_value`, written
///   as a JSON string.
/// * When no depth-1 field matches and `add_if_missing` is set (and not
///   removing), the pair is inserted just before the closing brace.
/// * A key owned by a different document kind is not written at all: the
///   input is returned unchanged with `changed == false` and a diagnostic is
///   emitted. This is a skip, not an error.
pub fn update(
    buf: &[u8],
    own: DocKind,
    registry: &KindRegistry,
    key: &str,
    new_value: &str,
    add_if_missing: bool,
    remove: bool,
) -> Result<(Vec<u8>, bool), DocError> {
    if !registry.can_mutate(own, key) {
        tracing::error!(key, ?own, "update rejected: key belongs to a different kind");
        return Ok((buf.to_vec(), false));
    }

    let mut scanner = Scanner::new(buf);
    let mut out = Emitter::with_capacity(buf.len() + key.len() + new_value.len() + 8);
    // Input bytes below the watermark have been emitted (or deliberately
    // dropped); everything between watermark and the current token is pending.
    let mut mark = 0usize;
    let mut changed = false;
    let mut fields_seen = 0usize;
    let mut prev_value_end = 0usize;

    match scanner.next()? {
        Some(Token::ObjectStart) => {}
        Some(_) => return Err(DocError::NotAnObject),
        None => return Err(TokenError::Eof(0).into()),
    }

    loop {
        match scanner.next()? {
            None => break,
            Some(Token::FieldName { text, .. }) if scanner.depth() == 1 => {
                let name_start = scanner.token_start();
                if !changed && text == key {
                    if remove {
                        // Drop the preceding comma when a sibling came before;
                        // otherwise the one that follows (if any).
                        let cut = if fields_seen > 0 {
                            prev_value_end
                        } else {
                            name_start
                        };
                        out.raw(&buf[mark..cut]);
                        let end = scanner.skip_value()?;
                        mark = if fields_seen == 0 {
                            skip_separator(buf, end)
                        } else {
                            end
                        };
                    } else {
                        out.raw(&buf[mark..name_start]);
                        out.str_field(key, new_value);
                        let end = scanner.skip_value()?;
                        mark = end;
                        prev_value_end = end;
                        fields_seen += 1;
                    }
                    changed = true;
                } else {
                    prev_value_end = scanner.skip_value()?;
                    fields_seen += 1;
                }
            }
            Some(Token::ObjectEnd) if scanner.depth() == 0 => {
                if !changed && add_if_missing && !remove {
                    let brace = scanner.token_start();
                    out.raw(&buf[mark..brace]);
                    if fields_seen > 0 {
                        out.comma();
                    }
                    out.str_field(key, new_value);
                    mark = brace;
                    changed = true;
                }
            }
            Some(_) => {}
        }
    }

    out.raw(&buf[mark..]);
    Ok((out.finish(), changed))
}

/// Advances past one field separator (whitespace, a comma, trailing
/// whitespace) after a removed first field. Returns `from` untouched when no
/// comma follows, so whitespace before the closing brace survives.
fn skip_separator(buf: &[u8], from: usize) -> usize {
    let mut pos = from;
    while pos < buf.len() && buf[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if pos < buf.len() && buf[pos] == b',' {
        pos += 1;
        while pos < buf.len() && buf[pos].is_ascii_whitespace() {
            pos += 1;
        }
        pos
    } else {
        from
    }
}
