//! CDP error types.

use thiserror::Error;

use pagescript_protocols::HostError;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not found or not running with remote debugging.
    #[error("Chrome not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Exception thrown by evaluated JavaScript.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// Whether the page session behind the error is gone and must be
    /// re-attached.
    pub fn is_detached(&self) -> bool {
        match self {
            CdpError::SessionClosed | CdpError::WebSocket(_) => true,
            // "Session with given id not found."
            CdpError::Protocol { code, .. } => *code == -32001,
            _ => false,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for HostError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Protocol { code, message } => HostError::Protocol { code, message },
            CdpError::JavaScript(message) => HostError::Injection(message),
            CdpError::Timeout(message) => HostError::Timeout(message),
            CdpError::InvalidResponse(message) => HostError::InvalidResponse(message),
            CdpError::Serialization(e) => HostError::InvalidResponse(e.to_string()),
            other => HostError::ConnectionFailed(other.to_string()),
        }
    }
}
