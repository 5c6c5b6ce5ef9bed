use std::borrow::Cow;

/// A single JSON token together with the exact source bytes it spans.
///
/// `raw` slices borrow from the scanned buffer and include surrounding
/// quotes for strings, so copying `raw` reproduces the original text
/// byte-for-byte. `text` is the decoded form (escapes resolved), borrowed
/// when no escape was present.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    /// An object key. Distinguished from [`Token::Str`] by position.
    FieldName {
        raw: &'a [u8],
        text: Cow<'a, str>,
    },
    Str {
        raw: &'a [u8],
        text: Cow<'a, str>,
    },
    /// A number literal, kept as its source text.
    Num {
        raw: &'a [u8],
    },
    Bool(bool),
    Null,
}

impl Token<'_> {
    /// True for tokens that open a nested structure.
    pub fn opens(&self) -> bool {
        matches!(self, Token::ObjectStart | Token::ArrayStart)
    }

    /// True for tokens that close a nested structure.
    pub fn closes(&self) -> bool {
        matches!(self, Token::ObjectEnd | Token::ArrayEnd)
    }

    pub fn is_field_name(&self) -> bool {
        matches!(self, Token::FieldName { .. })
    }
}
