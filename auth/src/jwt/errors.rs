use thiserror::Error;

use super::claims::TokenKind;

/// Error type for token signing and verification.
///
/// The verification failures are kept distinct so callers can test and log
/// them separately; the HTTP boundary is free to collapse all of them into a
/// generic unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
}
