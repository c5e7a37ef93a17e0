//! Protocol error types.

use thiserror::Error;

/// Errors that can occur while decoding records.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("record is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("malformed record body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record matches no known shape")]
    UnknownShape,
}
