//! Ollama-backed on-device model.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use pagescript_protocols::{
    ModelAvailability, ModelSession, OnDeviceModel, ProviderError, SessionOptions,
};

use crate::session::OllamaSession;
use crate::types::{tag_matches, TagsResponse};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// On-device model served by a local Ollama daemon.
pub struct OllamaModel {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(model, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        // Local generation on small hardware can take minutes.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(300))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl OnDeviceModel for OllamaModel {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn availability(&self) -> Result<ModelAvailability, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Ollama daemon unreachable: {}", e);
                return Ok(ModelAvailability::No);
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(ModelAvailability::Unknown(format!("HTTP {}", status.as_u16())));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if tags.models.iter().any(|tag| tag_matches(&tag.name, &self.model)) {
            Ok(ModelAvailability::Readily)
        } else {
            debug!("Model not pulled yet ({} models installed)", tags.models.len());
            Ok(ModelAvailability::AfterDownload)
        }
    }

    async fn create_session(
        &self,
        options: SessionOptions,
    ) -> Result<Arc<dyn ModelSession>, ProviderError> {
        debug!(
            "Creating on-device session: model={}, temperature={}, top_k={}",
            self.model, options.temperature, options.top_k
        );
        Ok(Arc::new(OllamaSession::new(
            self.client.clone(),
            &self.base_url,
            &self.model,
            options,
        )))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
