//! Text-generation provider errors.

use thiserror::Error;

use crate::types::ProviderKind;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// A cloud provider was selected but its key is empty.
    #[error("{0} API key is not configured. Set it in the settings first.")]
    NoApiKey(ProviderKind),

    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The on-device session failed; the handle must not be reused.
    #[error("Session error: {0}")]
    Session(String),
}

impl ProviderError {
    /// Map an HTTP error status and backend message to an error.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            429 => ProviderError::RateLimited(message),
            _ => ProviderError::ApiError { status, message },
        }
    }

    /// Whether the error is a precondition failure reported without
    /// attempting the call.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ProviderError::NoApiKey(_))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
