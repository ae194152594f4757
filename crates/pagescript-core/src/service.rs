//! Message handler: one [`Response`] for every [`Request`].

use std::sync::Arc;

use tracing::{debug, error, info};

use pagescript_config::Config;
use pagescript_protocols::{
    AiStatusReport, ExecutionResult, PageSummary, Request, Response, ScriptHost, Settings, TabId,
    TabInfo, TabQuery,
};

use crate::error::CoreError;
use crate::executor::ScriptExecutor;
use crate::extractor::extract_code;
use crate::prompts::{code_instruction, CODE_SYSTEM_PROMPT};
use crate::provider::ProviderClient;
use crate::store::SettingsStore;
use crate::summarizer::Summarizer;

/// Ties the provider client, executor, summarizer and settings together.
pub struct Service {
    provider: Arc<ProviderClient>,
    executor: Arc<ScriptExecutor>,
    summarizer: Summarizer,
    tabs: Arc<dyn TabQuery>,
    settings: SettingsStore,
}

impl Service {
    pub fn new(
        provider: Arc<ProviderClient>,
        tabs: Arc<dyn TabQuery>,
        host: Arc<dyn ScriptHost>,
        settings: SettingsStore,
        config: &Config,
    ) -> Self {
        let executor = Arc::new(ScriptExecutor::new(
            tabs.clone(),
            host.clone(),
            config.executor.clone(),
        ));
        let summarizer = Summarizer::new(
            host,
            executor.clone(),
            provider.clone(),
            config.summary.clone(),
        );
        Self {
            provider,
            executor,
            summarizer,
            tabs,
            settings,
        }
    }

    /// Parse and handle one JSON message.
    pub async fn handle_json(&self, message: &str) -> Response {
        match Request::from_json(message) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                debug!("Rejected message: {}", e);
                Response::error(e.to_string())
            }
        }
    }

    /// Handle a request. Errors are answered with [`Response::Error`].
    pub async fn handle(&self, request: Request) -> Response {
        let kind = request.kind();
        debug!("Handling {}", kind);
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_precondition() {
                    info!("{} refused: {}", kind, e);
                } else {
                    error!("{} failed: {}", kind, e);
                }
                Response::error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, request: Request) -> Result<Response, CoreError> {
        match request {
            Request::CheckAiStatus => {
                let report = self.check_status().await?;
                Ok(Response::AiStatus {
                    status: report.status,
                    message: report.message,
                    provider: report.provider,
                })
            }
            Request::GenerateScript { prompt } => {
                let code = self.generate_script(&prompt).await?;
                Ok(Response::ScriptGenerated { code })
            }
            Request::ExecuteScript { code, tab_id } => {
                let result = self.execute_script(tab_id, &code).await;
                Ok(Response::ScriptExecuted { result })
            }
            Request::GetCurrentTab => {
                let tab = self.current_tab().await?;
                Ok(Response::CurrentTab {
                    tab_id: tab.tab_id,
                    url: tab.url,
                })
            }
            Request::SummarizePage { tab_id } => {
                let summary = self.summarize_page(tab_id).await?;
                Ok(Response::SummarizeResult {
                    success: true,
                    summary: Some(summary),
                })
            }
            Request::GetSettings => Ok(Response::Settings {
                settings: self.settings().await?,
            }),
            Request::SaveSettings { settings } => {
                self.save_settings(&settings).await?;
                Ok(Response::SettingsSaved)
            }
        }
    }

    pub async fn check_status(&self) -> Result<AiStatusReport, CoreError> {
        let settings = self.settings.load().await?;
        Ok(self.provider.check_availability(&settings).await)
    }

    /// Generate code for an instruction and extract the runnable part.
    pub async fn generate_script(&self, prompt: &str) -> Result<String, CoreError> {
        if prompt.trim().is_empty() {
            return Err(CoreError::EmptyPrompt);
        }
        let settings = self.settings.load().await?;
        let raw = self
            .provider
            .generate(CODE_SYSTEM_PROMPT, &code_instruction(prompt), &settings)
            .await?;
        let code = extract_code(&raw)?;
        info!("Generated {} bytes of code with {}", code.len(), settings.provider.as_str());
        Ok(code)
    }

    pub async fn execute_script(&self, tab_id: TabId, code: &str) -> ExecutionResult {
        self.executor.execute(tab_id, code).await
    }

    pub async fn current_tab(&self) -> Result<TabInfo, CoreError> {
        self.tabs.active_tab().await?.ok_or(CoreError::NoActiveTab)
    }

    pub async fn summarize_page(&self, tab_id: TabId) -> Result<PageSummary, CoreError> {
        let settings = self.settings.load().await?;
        self.summarizer.summarize(tab_id, &settings).await
    }

    pub async fn settings(&self) -> Result<Settings, CoreError> {
        Ok(self.settings.load().await?)
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), CoreError> {
        self.settings.save(settings).await?;
        // Settings changes start from a fresh on-device session.
        self.provider.reset_session().await;
        Ok(())
    }

    pub async fn reset_session(&self) {
        self.provider.reset_session().await;
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
