//! Stateful generation session.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use tracing::debug;

use pagescript_protocols::{ModelSession, ProviderError, SessionOptions};

use crate::types::{GenerateOptions, GenerateRequest, GenerateResponse, OllamaError};

struct SessionState {
    context: Option<Vec<i64>>,
    destroyed: bool,
}

/// One conversation with the daemon. The context vector returned by each
/// generation is sent back with the next prompt.
pub struct OllamaSession {
    client: Client,
    url: String,
    model: String,
    options: SessionOptions,
    state: Mutex<SessionState>,
}

impl OllamaSession {
    pub(crate) fn new(client: Client, base_url: &str, model: &str, options: SessionOptions) -> Self {
        Self {
            client,
            url: format!("{}/api/generate", base_url),
            model: model.to_string(),
            options,
            state: Mutex::new(SessionState {
                context: None,
                destroyed: false,
            }),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn has_context(&self) -> bool {
        self.state.lock().context.is_some()
    }
}

#[async_trait]
impl ModelSession for OllamaSession {
    async fn prompt(&self, input: &str) -> Result<String, ProviderError> {
        let context = {
            let state = self.state.lock();
            if state.destroyed {
                return Err(ProviderError::Session("session was destroyed".to_string()));
            }
            state.context.clone()
        };

        let request = GenerateRequest {
            model: &self.model,
            prompt: input,
            system: &self.options.system_prompt,
            options: GenerateOptions {
                temperature: self.options.temperature,
                top_k: self.options.top_k,
            },
            stream: false,
            context,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Network("Failed to connect to the local model daemon".to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            return Err(ProviderError::Session(message));
        }

        let generated: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        debug!("On-device prompt returned {} characters", generated.response.len());

        let mut state = self.state.lock();
        if !state.destroyed {
            state.context = generated.context;
        }
        Ok(generated.response)
    }

    async fn destroy(&self) {
        let mut state = self.state.lock();
        state.destroyed = true;
        state.context = None;
    }
}
