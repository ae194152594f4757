//! User settings and provider selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which text-generation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Local model; no network call, may need a model download first.
    #[serde(rename = "on-device", alias = "chrome-ai")]
    OnDevice,
    #[default]
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// Stable identifier used on the wire and in config.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OnDevice => "on-device",
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Whether this provider is reached over HTTPS with an API key.
    pub fn is_cloud(&self) -> bool {
        !matches!(self, ProviderKind::OnDevice)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::OnDevice => "On-device model",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenAi => "OpenAI",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-device" | "chrome-ai" => Ok(ProviderKind::OnDevice),
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

/// Persisted user settings. One instance per installation.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default)]
    pub openai_api_key: String,
}

impl Settings {
    /// Key under which settings live in the key-value store.
    pub const STORAGE_KEY: &'static str = "settings";

    /// API key for a cloud provider. `None` for the on-device provider.
    pub fn api_key(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OnDevice => None,
            ProviderKind::Gemini => Some(self.gemini_api_key.as_str()),
            ProviderKind::OpenAi => Some(self.openai_api_key.as_str()),
        }
    }
}

// Keys never reach logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("provider", &self.provider)
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .finish()
    }
}

pub(crate) fn redact(key: &str) -> &'static str {
    if key.is_empty() { "<empty>" } else { "<redacted>" }
}
