use thiserror::Error;

/// Structural failures while scanning a JSON buffer.
///
/// These are terminal for the current pass; logical mismatches (key not
/// found, wrong value shape) are not token errors and are handled by callers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("unexpected end of input at byte {0}")]
    Eof(usize),
    #[error("unexpected byte 0x{byte:02x} at {pos}")]
    Unexpected { pos: usize, byte: u8 },
    #[error("invalid UTF-8 in string at byte {0}")]
    Utf8(usize),
    #[error("invalid escape sequence at byte {0}")]
    BadEscape(usize),
    #[error("close token without matching open at byte {0}")]
    Depth(usize),
}
