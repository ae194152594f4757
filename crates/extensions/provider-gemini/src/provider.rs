//! Gemini provider implementation.

use async_trait::async_trait;
use tracing::debug;

use pagescript_protocols::{CloudProvider, CompletionRequest, ProviderError, ProviderKind};

use crate::client::{GeminiClient, DEFAULT_BASE_URL};
use crate::types::*;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini provider. The API key comes with each request.
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(model, DEFAULT_BASE_URL)
    }

    /// Create provider against a custom API base URL.
    pub fn with_base_url(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(base_url),
            model: model.into(),
            temperature: 0.3,
            max_output_tokens: 2048,
        }
    }

    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// System prompt and instruction travel together in one user text part.
    pub(crate) fn build_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        let text = if request.system_prompt.is_empty() {
            request.prompt.clone()
        } else {
            format!("{}\n\n{}", request.system_prompt, request.prompt)
        };
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text(text)],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(request.temperature.unwrap_or(self.temperature)),
                max_output_tokens: Some(request.max_output_tokens.unwrap_or(self.max_output_tokens)),
            }),
        }
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

#[async_trait]
impl CloudProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let api_request = self.build_request(&request);
        let response = self
            .client
            .generate_content(&request.api_key, &self.model, &api_request)
            .await?;

        if let Some(text) = response.text() {
            debug!("Gemini returned {} characters", text.len());
            return Ok(text);
        }

        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .or_else(|| response.candidates.first().and_then(|c| c.finish_reason.clone()));
        Err(ProviderError::InvalidResponse(match reason {
            Some(reason) => format!("Gemini returned no text (reason: {})", reason),
            None => "Gemini returned no text".to_string(),
        }))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
