use agrodoc_json_token::TokenError;
use thiserror::Error;

/// Terminal failures for a navigation or mutation pass.
///
/// Only structural problems end up here. Logical mismatches (key not found,
/// value of the wrong shape, mutation of a foreign-kind field) are resolved
/// with canonical defaults or a no-op and a diagnostic instead.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("malformed document buffer: {0}")]
    Token(#[from] TokenError),
    #[error("document buffer is not a JSON object")]
    NotAnObject,
}
