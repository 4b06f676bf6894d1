//! Protocol errors.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while decoding or encoding bridge traffic.
///
/// Inbound decode failures are never fatal for the bridge: the dispatch loop
/// logs them and drops the offending line.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The input was not valid JSON.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was valid JSON but not a JSON object.
    #[error("message is not a json object")]
    NotAnObject,

    /// The `id` member was present but not a string.
    #[error("message id must be a string")]
    InvalidId,

    /// The `method` member was present but not a string.
    #[error("message method must be a string")]
    InvalidMethod,

    /// The envelope had neither an `id` nor a `method`.
    #[error("message has neither id nor method")]
    Unroutable,
}
