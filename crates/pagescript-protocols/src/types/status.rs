//! Provider availability status.

use serde::{Deserialize, Serialize};

use super::ProviderKind;

/// Availability of the selected text-generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiStatus {
    Checking,
    Ready,
    /// On-device model weights are not fetched yet.
    Downloading,
    Unavailable,
    NoApiKey,
    Error,
}

impl AiStatus {
    /// Wire name, as sent in `AI_STATUS`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AiStatus::Checking => "checking",
            AiStatus::Ready => "ready",
            AiStatus::Downloading => "downloading",
            AiStatus::Unavailable => "unavailable",
            AiStatus::NoApiKey => "no-api-key",
            AiStatus::Error => "error",
        }
    }
}

/// Result of an availability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiStatusReport {
    pub status: AiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderKind>,
}

impl AiStatusReport {
    pub fn new(status: AiStatus, provider: ProviderKind) -> Self {
        Self {
            status,
            message: None,
            provider: Some(provider),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_ready(&self) -> bool {
        self.status == AiStatus::Ready
    }
}
