//! JSON string escape and unescape helpers.

use std::borrow::Cow;

use agrodoc_buffers::Writer;

use crate::TokenError;

/// Finds the closing quote of a JSON string, starting just past the opening
/// quote. Backslash pairs are stepped over as a unit.
pub fn find_ending_quote(data: &[u8], from: usize) -> Result<usize, TokenError> {
    let mut i = from;
    while i < data.len() {
        match data[i] {
            b'"' => return Ok(i),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    Err(TokenError::Eof(data.len()))
}

/// Decodes the inner bytes of a JSON string (between the quotes).
///
/// Returns a borrowed slice when no escape sequence is present. `base` is the
/// byte offset of `raw` within the enclosing buffer, used for error positions.
pub fn unescape(raw: &[u8], base: usize) -> Result<Cow<'_, str>, TokenError> {
    if !raw.contains(&b'\\') {
        return std::str::from_utf8(raw)
            .map(Cow::Borrowed)
            .map_err(|_| TokenError::Utf8(base));
    }

    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != b'\\' {
            let start = i;
            while i < raw.len() && raw[i] != b'\\' {
                i += 1;
            }
            out.push_str(
                std::str::from_utf8(&raw[start..i]).map_err(|_| TokenError::Utf8(base + start))?,
            );
            continue;
        }
        i += 1;
        if i >= raw.len() {
            return Err(TokenError::BadEscape(base + i));
        }
        match raw[i] {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let hi = parse_hex4(raw, i + 1, base)?;
                i += 4;
                let code = if (0xD800..0xDC00).contains(&hi) {
                    // Surrogate pair: a second \uXXXX must follow.
                    if i + 2 >= raw.len() || raw[i + 1] != b'\\' || raw[i + 2] != b'u' {
                        return Err(TokenError::BadEscape(base + i));
                    }
                    let lo = parse_hex4(raw, i + 3, base)?;
                    i += 6;
                    if !(0xDC00..0xE000).contains(&lo) {
                        return Err(TokenError::BadEscape(base + i));
                    }
                    0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
                } else {
                    hi
                };
                out.push(char::from_u32(code).ok_or(TokenError::BadEscape(base + i))?);
            }
            _ => return Err(TokenError::BadEscape(base + i)),
        }
        i += 1;
    }
    Ok(Cow::Owned(out))
}

fn parse_hex4(raw: &[u8], at: usize, base: usize) -> Result<u32, TokenError> {
    if at + 4 > raw.len() {
        return Err(TokenError::BadEscape(base + at));
    }
    let mut value = 0u32;
    for &b in &raw[at..at + 4] {
        let digit = match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'a'..=b'f' => (b - b'a') as u32 + 10,
            b'A'..=b'F' => (b - b'A') as u32 + 10,
            _ => return Err(TokenError::BadEscape(base + at)),
        };
        value = (value << 4) | digit;
    }
    Ok(value)
}

/// Writes `s` with JSON escaping applied, without surrounding quotes.
pub fn escape_into(s: &str, out: &mut Writer) {
    let bytes = s.as_bytes();
    let mut last = 0;
    for (i, ch) in s.char_indices() {
        let escaped: Option<&str> = match ch {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\u{0008}' => Some("\\b"),
            '\t' => Some("\\t"),
            '\n' => Some("\\n"),
            '\u{000C}' => Some("\\f"),
            '\r' => Some("\\r"),
            _ => None,
        };
        if let Some(esc) = escaped {
            out.buf(&bytes[last..i]);
            out.ascii(esc);
            last = i + 1;
        } else if (ch as u32) < 0x20 {
            out.buf(&bytes[last..i]);
            out.ascii(&format!("\\u{:04x}", ch as u32));
            last = i + 1;
        }
    }
    out.buf(&bytes[last..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape(s: &str) -> String {
        let mut w = Writer::new();
        escape_into(s, &mut w);
        String::from_utf8(w.into_vec()).unwrap()
    }

    #[test]
    fn escape_plain_passthrough() {
        assert_eq!(escape("hello"), "hello");
        assert_eq!(escape("café"), "café");
    }

    #[test]
    fn escape_specials() {
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("line1\nline2"), "line1\\nline2");
        assert_eq!(escape("\u{0001}"), "\\u0001");
    }

    #[test]
    fn unescape_borrows_when_plain() {
        let cow = unescape(b"plain text", 0).unwrap();
        assert!(matches!(cow, Cow::Borrowed(_)));
        assert_eq!(cow, "plain text");
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape(br"a\tb\n", 0).unwrap(), "a\tb\n");
        assert_eq!(unescape(br"A", 0).unwrap(), "A");
        assert_eq!(unescape("😀".as_bytes(), 0).unwrap(), "😀");
        assert_eq!(unescape(br"\/", 0).unwrap(), "/");
    }

    #[test]
    fn unescape_rejects_bad_sequences() {
        assert!(matches!(
            unescape(br"\q", 0),
            Err(TokenError::BadEscape(_))
        ));
        assert!(matches!(
            unescape(br"\u12", 0),
            Err(TokenError::BadEscape(_))
        ));
        // Lone high surrogate.
        assert!(matches!(
            unescape(br"\ud83d", 0),
            Err(TokenError::BadEscape(_))
        ));
    }

    #[test]
    fn ending_quote_steps_over_escapes() {
        let data = br#""a\"b" rest"#;
        assert_eq!(find_ending_quote(data, 1).unwrap(), 5);
        assert!(matches!(
            find_ending_quote(br#""never ends"#, 1),
            Err(TokenError::Eof(_))
        ));
    }
}
