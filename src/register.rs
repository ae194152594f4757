//! Wiring of providers, browser host and settings store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use pagescript_config::{Config, ConfigLoader};
use pagescript_core::{CloudProviders, JsonFileStore, ProviderClient, Service, SettingsStore};
use pagescript_host_cdp::CdpHost;
use pagescript_protocols::{
    ExecutionWorld, HostError, InjectionCapabilities, RegisteredScript, ScriptHost, TabId, TabInfo,
    TabQuery,
};
use pagescript_provider_gemini::GeminiProvider;
use pagescript_provider_ondevice::OllamaModel;
use pagescript_provider_openai::OpenAiProvider;

/// Build the provider client from configuration. Cloud keys come from the
/// stored settings on every call, not from here.
pub(crate) fn register_providers(config: &Config) -> ProviderClient {
    let providers = &config.providers;

    let on_device = Arc::new(OllamaModel::with_base_url(
        providers.on_device.model.clone(),
        providers.on_device.base_url.clone(),
    ));

    let cloud = CloudProviders::new()
        .with(Arc::new(
            GeminiProvider::with_base_url(
                providers.gemini.model.clone(),
                providers.gemini.base_url.clone(),
            )
            .with_generation(providers.gemini.temperature, providers.gemini.max_output_tokens),
        ))
        .with(Arc::new(
            OpenAiProvider::with_url(
                providers.openai.model.clone(),
                providers.openai.api_url.clone(),
            )
            .with_generation(providers.openai.temperature, providers.openai.max_output_tokens),
        ));

    info!(
        "Registered providers: on-device ({}), {}",
        providers.on_device.model,
        cloud
            .kinds()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    ProviderClient::new(on_device, cloud)
        .with_session_tuning(providers.on_device.temperature, providers.on_device.top_k)
}

/// Connect to the browser. Without one, tab and injection calls fail with a
/// connection error while generation and settings keep working.
pub(crate) async fn connect_host(config: &Config) -> (Arc<dyn TabQuery>, Arc<dyn ScriptHost>) {
    match CdpHost::connect(&config.browser).await {
        Ok(host) => {
            let host = Arc::new(host);
            let tabs: Arc<dyn TabQuery> = host.clone();
            let scripts: Arc<dyn ScriptHost> = host;
            (tabs, scripts)
        }
        Err(e) => {
            warn!("Browser unavailable, page operations will fail: {}", e);
            let host = Arc::new(DisconnectedHost::for_endpoint(&config.browser.endpoint));
            let tabs: Arc<dyn TabQuery> = host.clone();
            let scripts: Arc<dyn ScriptHost> = host;
            (tabs, scripts)
        }
    }
}

pub(crate) async fn build_service(config: &Config) -> anyhow::Result<Service> {
    let provider = Arc::new(register_providers(config));
    let (tabs, host) = connect_host(config).await;

    let storage_path = ConfigLoader::expand_path(&config.storage.path);
    info!("Settings stored in {}", storage_path.display());
    let settings = SettingsStore::new(Arc::new(JsonFileStore::new(storage_path)));

    Ok(Service::new(provider, tabs, host, settings, config))
}

/// Stand-in host used when no browser endpoint answers.
pub(crate) struct DisconnectedHost {
    endpoint: String,
}

impl DisconnectedHost {
    pub(crate) fn for_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    fn error(&self) -> HostError {
        HostError::ConnectionFailed(format!("no browser at {}", self.endpoint))
    }
}

#[async_trait]
impl TabQuery for DisconnectedHost {
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError> {
        Err(self.error())
    }

    async fn get_tab(&self, _tab_id: TabId) -> Result<TabInfo, HostError> {
        Err(self.error())
    }
}

#[async_trait]
impl ScriptHost for DisconnectedHost {
    fn capabilities(&self) -> InjectionCapabilities {
        InjectionCapabilities::none()
    }

    async fn call_function(
        &self,
        _tab_id: TabId,
        _world: ExecutionWorld,
        _function: &str,
        _args: Vec<Value>,
    ) -> Result<Value, HostError> {
        Err(self.error())
    }

    async fn register_scripts(&self, _scripts: Vec<RegisteredScript>) -> Result<(), HostError> {
        Err(self.error())
    }

    async fn unregister_scripts(&self, _ids: &[String]) -> Result<(), HostError> {
        Err(self.error())
    }

    async fn registered_scripts(&self) -> Result<Vec<RegisteredScript>, HostError> {
        Ok(Vec::new())
    }

    async fn reload(&self, _tab_id: TabId) -> Result<(), HostError> {
        Err(self.error())
    }
}
