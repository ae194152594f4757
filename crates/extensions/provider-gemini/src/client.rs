//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use pagescript_protocols::ProviderError;

use crate::types::*;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => e.error.message,
                Err(_) => status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            };
            return Err(ProviderError::from_api_response(status.as_u16(), message));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}
