//! Pull scanner producing [`Token`]s from a JSON byte buffer.

use std::borrow::Cow;

use agrodoc_buffers::Reader;

use crate::escape::{find_ending_quote, unescape};
use crate::{Token, TokenError};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Frame {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Expecting a value; `allow_close` when `]` may end an empty array.
    Value { allow_close: bool },
    /// Expecting an object key; `allow_close` when `}` may end an empty object.
    Key { allow_close: bool },
    /// Expecting `,` or a closing bracket after a completed value.
    AfterValue,
    /// The single top-level value is complete.
    Done,
}

/// A streaming JSON reader.
///
/// The scanner validates structure as it goes (separators, bracket pairing,
/// key positions) and keeps a nesting counter: [`Scanner::depth`] grows on
/// every `{`/`[` and shrinks on the matching close. Byte positions
/// ([`Scanner::token_start`], [`Scanner::pos`]) refer to the scanned buffer,
/// which lets callers copy whole regions of input verbatim.
///
/// One scanner is opened per navigation or mutation pass and dropped when the
/// pass ends; after the first `Err` the scanner must not be used again.
pub struct Scanner<'a> {
    reader: Reader<'a>,
    stack: Vec<Frame>,
    state: State,
    token_start: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(input),
            stack: Vec::new(),
            state: State::Value { allow_close: false },
            token_start: 0,
        }
    }

    /// Current nesting depth (number of unclosed `{`/`[`).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Byte offset just past the last consumed token.
    pub fn pos(&self) -> usize {
        self.reader.x
    }

    /// Byte offset of the last token's first byte.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// The buffer being scanned.
    pub fn input(&self) -> &'a [u8] {
        self.reader.uint8
    }

    /// Pulls the next token, or `None` at a clean end of input.
    pub fn next(&mut self) -> Result<Option<Token<'a>>, TokenError> {
        self.skip_whitespace();
        if self.reader.is_empty() {
            return match self.state {
                State::Done => Ok(None),
                _ => Err(TokenError::Eof(self.reader.x)),
            };
        }
        self.token_start = self.reader.x;
        let c = self.reader.peek();
        match self.state {
            State::Done => Err(TokenError::Unexpected {
                pos: self.token_start,
                byte: c,
            }),
            State::AfterValue => match c {
                b',' => {
                    self.reader.skip(1);
                    self.state = match self.stack.last() {
                        Some(Frame::Object) => State::Key { allow_close: false },
                        Some(Frame::Array) => State::Value { allow_close: false },
                        None => {
                            return Err(TokenError::Unexpected {
                                pos: self.token_start,
                                byte: c,
                            })
                        }
                    };
                    self.next()
                }
                b'}' => {
                    self.close(Frame::Object)?;
                    Ok(Some(Token::ObjectEnd))
                }
                b']' => {
                    self.close(Frame::Array)?;
                    Ok(Some(Token::ArrayEnd))
                }
                _ => Err(TokenError::Unexpected {
                    pos: self.token_start,
                    byte: c,
                }),
            },
            State::Key { allow_close } => match c {
                b'}' if allow_close => {
                    self.close(Frame::Object)?;
                    Ok(Some(Token::ObjectEnd))
                }
                b'"' => {
                    let (raw, text) = self.read_string()?;
                    self.skip_whitespace();
                    if self.reader.is_empty() {
                        return Err(TokenError::Eof(self.reader.x));
                    }
                    let sep = self.reader.peek();
                    if sep != b':' {
                        return Err(TokenError::Unexpected {
                            pos: self.reader.x,
                            byte: sep,
                        });
                    }
                    self.reader.skip(1);
                    self.state = State::Value { allow_close: false };
                    Ok(Some(Token::FieldName { raw, text }))
                }
                _ => Err(TokenError::Unexpected {
                    pos: self.token_start,
                    byte: c,
                }),
            },
            State::Value { allow_close } => match c {
                b']' if allow_close => {
                    self.close(Frame::Array)?;
                    Ok(Some(Token::ArrayEnd))
                }
                b'{' => {
                    self.reader.skip(1);
                    self.stack.push(Frame::Object);
                    self.state = State::Key { allow_close: true };
                    Ok(Some(Token::ObjectStart))
                }
                b'[' => {
                    self.reader.skip(1);
                    self.stack.push(Frame::Array);
                    self.state = State::Value { allow_close: true };
                    Ok(Some(Token::ArrayStart))
                }
                b'"' => {
                    let (raw, text) = self.read_string()?;
                    self.end_value();
                    Ok(Some(Token::Str { raw, text }))
                }
                b't' => {
                    self.literal(b"true")?;
                    self.end_value();
                    Ok(Some(Token::Bool(true)))
                }
                b'f' => {
                    self.literal(b"false")?;
                    self.end_value();
                    Ok(Some(Token::Bool(false)))
                }
                b'n' => {
                    self.literal(b"null")?;
                    self.end_value();
                    Ok(Some(Token::Null))
                }
                b'-' | b'0'..=b'9' => {
                    let raw = self.read_number()?;
                    self.end_value();
                    Ok(Some(Token::Num { raw }))
                }
                _ => Err(TokenError::Unexpected {
                    pos: self.token_start,
                    byte: c,
                }),
            },
        }
    }

    /// Consumes an entire value (scalar or nested structure) and returns the
    /// byte offset just past it. Call where a value is expected, e.g. right
    /// after a [`Token::FieldName`].
    pub fn skip_value(&mut self) -> Result<usize, TokenError> {
        let base = self.stack.len();
        match self.next()? {
            None => Err(TokenError::Eof(self.reader.x)),
            Some(token) if token.opens() => self.finish_to_depth(base),
            Some(_) => Ok(self.reader.x),
        }
    }

    /// Consumes tokens until the nesting depth drops back to `target`,
    /// returning the byte offset just past the closing bracket.
    pub fn finish_to_depth(&mut self, target: usize) -> Result<usize, TokenError> {
        while self.stack.len() > target {
            if self.next()?.is_none() {
                return Err(TokenError::Eof(self.reader.x));
            }
        }
        Ok(self.reader.x)
    }

    fn skip_whitespace(&mut self) {
        while !self.reader.is_empty() {
            match self.reader.peek() {
                b' ' | b'\t' | b'\n' | b'\r' => self.reader.skip(1),
                _ => break,
            }
        }
    }

    fn end_value(&mut self) {
        self.state = if self.stack.is_empty() {
            State::Done
        } else {
            State::AfterValue
        };
    }

    fn close(&mut self, expect: Frame) -> Result<(), TokenError> {
        self.reader.skip(1);
        match self.stack.pop() {
            Some(frame) if frame == expect => {
                self.end_value();
                Ok(())
            }
            _ => Err(TokenError::Depth(self.token_start)),
        }
    }

    fn read_string(&mut self) -> Result<(&'a [u8], Cow<'a, str>), TokenError> {
        let data = self.reader.uint8;
        let start = self.reader.x;
        let inner = start + 1; // past the opening quote
        let end = find_ending_quote(data, inner)?;
        let text = unescape(&data[inner..end], inner)?;
        self.reader.x = end + 1;
        Ok((&data[start..end + 1], text))
    }

    fn literal(&mut self, word: &'static [u8]) -> Result<(), TokenError> {
        let data = self.reader.uint8;
        let x = self.reader.x;
        if x + word.len() > data.len() || &data[x..x + word.len()] != word {
            return Err(TokenError::Unexpected {
                pos: x,
                byte: data[x],
            });
        }
        self.reader.skip(word.len());
        Ok(())
    }

    fn read_number(&mut self) -> Result<&'a [u8], TokenError> {
        let data = self.reader.uint8;
        let len = data.len();
        let start = self.reader.x;
        let mut x = start;
        if data[x] == b'-' {
            x += 1;
        }
        let int_start = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == int_start {
            return Err(self.number_error(x));
        }
        if x < len && data[x] == b'.' {
            x += 1;
            let frac_start = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == frac_start {
                return Err(self.number_error(x));
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            let exp_start = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == exp_start {
                return Err(self.number_error(x));
            }
        }
        self.reader.x = x;
        Ok(&data[start..x])
    }

    fn number_error(&self, at: usize) -> TokenError {
        let data = self.reader.uint8;
        if at < data.len() {
            TokenError::Unexpected {
                pos: at,
                byte: data[at],
            }
        } else {
            TokenError::Eof(at)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(input: &[u8]) -> Vec<Token<'_>> {
        let mut scanner = Scanner::new(input);
        let mut out = Vec::new();
        while let Some(t) = scanner.next().unwrap() {
            out.push(t);
        }
        out
    }

    #[test]
    fn object_token_stream() {
        let tokens = all_tokens(br#"{"a":1,"b":"x","c":true,"d":null}"#);
        assert_eq!(tokens.len(), 10);
        assert!(tokens[1].is_field_name());
        assert_eq!(tokens[2], Token::Num { raw: b"1" });
        assert_eq!(tokens[6], Token::Bool(true));
        assert_eq!(tokens[8], Token::Null);
        assert_eq!(tokens[9], Token::ObjectEnd);
    }

    #[test]
    fn strings_keep_source_spans() {
        let input = br#"{"k":"a\tb"}"#;
        let mut scanner = Scanner::new(input);
        scanner.next().unwrap(); // {
        match scanner.next().unwrap().unwrap() {
            Token::FieldName { raw, text } => {
                assert_eq!(raw, br#""k""#);
                assert_eq!(text, "k");
            }
            other => panic!("expected field name, got {other:?}"),
        }
        match scanner.next().unwrap().unwrap() {
            Token::Str { raw, text } => {
                assert_eq!(raw, br#""a\tb""#);
                assert_eq!(text, "a\tb");
            }
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn key_vs_value_classification() {
        // "a" in the nested array is a value, not a key.
        let tokens = all_tokens(br#"{"list":["a",{"a":2}]}"#);
        let names: Vec<bool> = tokens.iter().map(Token::is_field_name).collect();
        assert_eq!(
            names,
            vec![false, true, false, false, false, true, false, false, false, false]
        );
    }

    #[test]
    fn depth_counter_tracks_nesting() {
        let input = br#"{"a":{"b":[1,{"c":2}]}}"#;
        let mut scanner = Scanner::new(input);
        let mut max_depth = 0;
        while scanner.next().unwrap().is_some() {
            max_depth = max_depth.max(scanner.depth());
        }
        assert_eq!(max_depth, 4);
        assert_eq!(scanner.depth(), 0);
    }

    #[test]
    fn skip_value_covers_whole_subtree() {
        let input = br#"{"a":{"x":[1,2,{"y":3}]},"b":2}"#;
        let mut scanner = Scanner::new(input);
        scanner.next().unwrap(); // {
        scanner.next().unwrap(); // "a"
        let end = scanner.skip_value().unwrap();
        assert_eq!(&input[..end], br#"{"a":{"x":[1,2,{"y":3}]}"#);
        match scanner.next().unwrap().unwrap() {
            Token::FieldName { text, .. } => assert_eq!(text, "b"),
            other => panic!("expected field name, got {other:?}"),
        }
    }

    #[test]
    fn top_level_scalar_then_clean_eof() {
        let mut scanner = Scanner::new(b" 42 ");
        assert_eq!(scanner.next().unwrap(), Some(Token::Num { raw: b"42" }));
        assert_eq!(scanner.next().unwrap(), None);
    }

    #[test]
    fn rejects_missing_colon() {
        let mut scanner = Scanner::new(br#"{"a" 1}"#);
        scanner.next().unwrap();
        assert!(matches!(
            scanner.next(),
            Err(TokenError::Unexpected { byte: b'1', .. })
        ));
    }

    #[test]
    fn rejects_truncated_object() {
        let mut scanner = Scanner::new(br#"{"a":1"#);
        scanner.next().unwrap();
        scanner.next().unwrap();
        scanner.next().unwrap();
        assert!(matches!(scanner.next(), Err(TokenError::Eof(_))));
    }

    #[test]
    fn rejects_mismatched_close() {
        let mut scanner = Scanner::new(b"[1}");
        scanner.next().unwrap();
        scanner.next().unwrap();
        assert!(matches!(scanner.next(), Err(TokenError::Depth(_))));
    }

    #[test]
    fn rejects_trailing_garbage() {
        let mut scanner = Scanner::new(b"{} x");
        scanner.next().unwrap();
        scanner.next().unwrap();
        assert!(matches!(
            scanner.next(),
            Err(TokenError::Unexpected { byte: b'x', .. })
        ));
    }

    #[test]
    fn accepts_empty_containers() {
        assert_eq!(all_tokens(b"{}").len(), 2);
        assert_eq!(all_tokens(b"[]").len(), 2);
        assert_eq!(all_tokens(br#"{"a":[]}"#).len(), 5);
    }

    #[test]
    fn number_forms() {
        assert_eq!(all_tokens(b"-1.5e+10"), vec![Token::Num { raw: b"-1.5e+10" }]);
        let mut scanner = Scanner::new(b"1.");
        assert!(scanner.next().is_err());
    }
}
