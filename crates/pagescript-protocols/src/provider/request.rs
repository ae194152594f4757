//! Provider request types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::redact;

/// A single completion request for a cloud provider.
#[derive(Clone)]
pub struct CompletionRequest {
    pub api_key: String,
    pub system_prompt: String,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(
        api_key: impl Into<String>,
        system_prompt: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

impl fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("api_key", &redact(&self.api_key))
            .field("system_prompt_len", &self.system_prompt.len())
            .field("prompt", &self.prompt)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

/// Decoding options fixed at session creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub system_prompt: String,
    pub temperature: f32,
    pub top_k: u32,
}

impl SessionOptions {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            temperature: 0.3,
            top_k: 3,
        }
    }
}

/// Availability reported by an on-device model probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelAvailability {
    /// Usable immediately.
    Readily,
    /// Supported, but the weights must be downloaded first.
    AfterDownload,
    /// Not usable on this machine.
    No,
    /// A value the probe did not recognise.
    Unknown(String),
}
