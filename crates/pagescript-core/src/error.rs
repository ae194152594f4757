//! Core error type.

use thiserror::Error;

use pagescript_protocols::{HostError, ProtocolError, ProviderError, StoreError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Model output had nothing runnable left after extraction.
    #[error("could not produce valid code")]
    InvalidCode,

    #[error("Scripts cannot run on this page ({0})")]
    PrivilegedUrl(String),

    #[error("No active tab found")]
    NoActiveTab,

    #[error("Enter an instruction first")]
    EmptyPrompt,

    #[error("no readable text on this page")]
    EmptyPage,
}

impl CoreError {
    /// Failures detected before any backend or page was touched.
    pub fn is_precondition(&self) -> bool {
        match self {
            CoreError::Provider(e) => e.is_precondition(),
            CoreError::InvalidCode
            | CoreError::PrivilegedUrl(_)
            | CoreError::NoActiveTab
            | CoreError::EmptyPrompt => true,
            _ => false,
        }
    }
}
