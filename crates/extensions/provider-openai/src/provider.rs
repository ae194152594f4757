//! OpenAI provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use pagescript_protocols::{CloudProvider, CompletionRequest, ProviderError, ProviderKind};

use crate::api::{ApiErrorBody, ApiMessage, ApiRequest, ApiResponse};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI chat-completions provider. The API key comes with each request.
pub struct OpenAiProvider {
    model: String,
    api_url: String,
    client: reqwest::Client,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_url(model, DEFAULT_API_URL)
    }

    /// Create provider with custom API URL (for OpenAI-compatible APIs).
    pub fn with_url(model: impl Into<String>, api_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            model: model.into(),
            api_url: api_url.into(),
            client,
            temperature: 0.3,
            max_tokens: 2048,
        }
    }

    pub fn with_generation(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    fn build_request(&self, request: &CompletionRequest) -> ApiRequest {
        let mut messages = Vec::with_capacity(2);
        if !request.system_prompt.is_empty() {
            messages.push(ApiMessage::new("system", request.system_prompt.as_str()));
        }
        messages.push(ApiMessage::new("user", request.prompt.as_str()));

        ApiRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(request.max_output_tokens.unwrap_or(self.max_tokens)),
            temperature: Some(request.temperature.unwrap_or(self.temperature)),
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        api_request: &ApiRequest,
    ) -> Result<ApiResponse, ProviderError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| {
                    if text.trim().is_empty() {
                        status.canonical_reason().unwrap_or("request failed").to_string()
                    } else {
                        text
                    }
                });
            return Err(ProviderError::from_api_response(status.as_u16(), message));
        }

        serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

impl Default for OpenAiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

#[async_trait]
impl CloudProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let api_request = self.build_request(&request);
        debug!("OpenAI chat completion: model={}", self.model);
        let response = self.send_request(&request.api_key, &api_request).await?;
        response
            .into_text()
            .ok_or_else(|| ProviderError::InvalidResponse("OpenAI returned no content".to_string()))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
