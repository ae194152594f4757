//! Browser host (tab query and script injection) errors.

use thiserror::Error;

use crate::types::TabId;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Browser connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Operation not supported by this host: {0}")]
    Unsupported(String),

    #[error("Script injection failed: {0}")]
    Injection(String),

    #[error("Host protocol error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_not_found_display() {
        let err = HostError::TabNotFound(42);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_protocol_error_display() {
        let err = HostError::Protocol {
            code: -32000,
            message: "Cannot find context".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("-32000"));
        assert!(display.contains("Cannot find context"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = HostError::Unsupported("registration".to_string());
        assert!(err.to_string().contains("not supported"));
    }
}
