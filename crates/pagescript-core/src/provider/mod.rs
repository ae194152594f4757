//! Uniform access to the text-generation backends.

mod registry;
mod session;

pub use registry::CloudProviders;
pub use session::SessionSlot;

use std::sync::Arc;

use tracing::{debug, info};

use pagescript_protocols::{
    AiStatus, AiStatusReport, CompletionRequest, ModelAvailability, OnDeviceModel, ProviderError,
    ProviderKind, SessionOptions, Settings,
};

/// Selects a backend from the settings on every call.
pub struct ProviderClient {
    on_device: Arc<dyn OnDeviceModel>,
    cloud: CloudProviders,
    session: SessionSlot,
    temperature: f32,
    top_k: u32,
}

impl ProviderClient {
    pub fn new(on_device: Arc<dyn OnDeviceModel>, cloud: CloudProviders) -> Self {
        let defaults = SessionOptions::new("");
        Self {
            on_device,
            cloud,
            session: SessionSlot::new(),
            temperature: defaults.temperature,
            top_k: defaults.top_k,
        }
    }

    /// Decoding options for on-device sessions.
    pub fn with_session_tuning(mut self, temperature: f32, top_k: u32) -> Self {
        self.temperature = temperature;
        self.top_k = top_k;
        self
    }

    /// Probe whether the selected backend can be used. Never mutates settings.
    pub async fn check_availability(&self, settings: &Settings) -> AiStatusReport {
        let kind = settings.provider;
        if kind.is_cloud() {
            return self.check_cloud(kind, settings);
        }

        match self.on_device.availability().await {
            Ok(ModelAvailability::Readily) => AiStatusReport::new(AiStatus::Ready, kind)
                .with_message("The on-device model is ready"),
            Ok(ModelAvailability::AfterDownload) => AiStatusReport::new(AiStatus::Downloading, kind)
                .with_message("The on-device model is being downloaded. This only happens once."),
            Ok(ModelAvailability::No) => AiStatusReport::new(AiStatus::Unavailable, kind)
                .with_message("The on-device model is not available on this machine"),
            Ok(ModelAvailability::Unknown(value)) => AiStatusReport::new(AiStatus::Error, kind)
                .with_message(format!("Unknown model availability: {}", value)),
            Err(e) => AiStatusReport::new(AiStatus::Error, kind)
                .with_message(format!("Failed to check the on-device model: {}", e)),
        }
    }

    fn check_cloud(&self, kind: ProviderKind, settings: &Settings) -> AiStatusReport {
        let has_key = settings.api_key(kind).is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return AiStatusReport::new(AiStatus::NoApiKey, kind)
                .with_message(ProviderError::NoApiKey(kind).to_string());
        }
        match self.cloud.get(kind) {
            Some(provider) => AiStatusReport::new(AiStatus::Ready, kind)
                .with_message(format!("{} ({}) is ready", kind, provider.model())),
            None => AiStatusReport::new(AiStatus::Unavailable, kind)
                .with_message(format!("{} is not configured in this build", kind)),
        }
    }

    /// Produce raw model text for an instruction under a system prompt.
    pub async fn generate(
        &self,
        system_prompt: &str,
        instruction: &str,
        settings: &Settings,
    ) -> Result<String, ProviderError> {
        let kind = settings.provider;
        debug!("Generating with {}", kind.as_str());

        if !kind.is_cloud() {
            let options = SessionOptions {
                system_prompt: system_prompt.to_string(),
                temperature: self.temperature,
                top_k: self.top_k,
            };
            return self
                .session
                .prompt(self.on_device.as_ref(), options, instruction)
                .await;
        }

        let api_key = settings
            .api_key(kind)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::NoApiKey(kind))?;
        let provider = self
            .cloud
            .get(kind)
            .ok_or_else(|| ProviderError::Unavailable(format!("{} is not configured", kind)))?;

        let text = provider
            .complete(CompletionRequest::new(api_key, system_prompt, instruction))
            .await?;
        info!("{} returned {} characters", kind, text.len());
        Ok(text)
    }

    /// Destroy the cached on-device session.
    pub async fn reset_session(&self) {
        self.session.reset().await;
    }

    pub async fn has_session(&self) -> bool {
        self.session.is_live().await
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
