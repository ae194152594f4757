//! Message protocol errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),

    #[error("Invalid match pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
