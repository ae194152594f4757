//! Page text extraction and summarization.

mod page_script;
mod parse;

pub use page_script::{OVERLAY_ID, OVERLAY_RENDERER, PAGE_TEXT_EXTRACTOR};
pub use parse::{parse_summary, truncate_text, TRUNCATION_MARKER};

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use pagescript_config::SummaryConfig;
use pagescript_protocols::{ExecutionWorld, HostError, PageSummary, ScriptHost, Settings, TabId};

use crate::error::CoreError;
use crate::executor::ScriptExecutor;
use crate::prompts::{summary_instruction, summary_system_prompt};
use crate::provider::ProviderClient;

/// Summarizes the text of a tab through the provider client.
pub struct Summarizer {
    host: Arc<dyn ScriptHost>,
    executor: Arc<ScriptExecutor>,
    provider: Arc<ProviderClient>,
    config: SummaryConfig,
}

impl Summarizer {
    pub fn new(
        host: Arc<dyn ScriptHost>,
        executor: Arc<ScriptExecutor>,
        provider: Arc<ProviderClient>,
        config: SummaryConfig,
    ) -> Self {
        Self {
            host,
            executor,
            provider,
            config,
        }
    }

    /// Extract, summarize and (if enabled) render the summary in the page.
    pub async fn summarize(&self, tab_id: TabId, settings: &Settings) -> Result<PageSummary, CoreError> {
        let tab = self.executor.resolve_target(tab_id).await?;

        let text = self.extract_text(tab_id).await?;
        if text.trim().is_empty() {
            return Err(CoreError::EmptyPage);
        }
        let text = truncate_text(&text, self.config.max_chars);
        debug!("Summarizing {} characters from {}", text.chars().count(), tab.url);

        let raw = self
            .provider
            .generate(
                &summary_system_prompt(&self.config.language),
                &summary_instruction(tab.title.as_deref(), &text),
                settings,
            )
            .await?;
        let summary = parse_summary(&raw);
        info!("Summarized tab {} ({} points)", tab_id, summary.points.len());

        if self.config.overlay {
            if let Err(e) = self.render_overlay(tab_id, &summary).await {
                warn!("Failed to render summary overlay in tab {}: {}", tab_id, e);
            }
        }
        Ok(summary)
    }

    /// Visible text of the page.
    pub async fn extract_text(&self, tab_id: TabId) -> Result<String, CoreError> {
        if !self.host.capabilities().direct_call {
            return Err(HostError::Unsupported(
                "reading page text requires direct function calls".to_string(),
            )
            .into());
        }
        let value = self
            .host
            .call_function(tab_id, ExecutionWorld::Isolated, PAGE_TEXT_EXTRACTOR, Vec::new())
            .await?;
        match value {
            Value::String(text) => Ok(text),
            Value::Null => Ok(String::new()),
            other => Err(HostError::InvalidResponse(format!(
                "expected page text, got {}",
                other
            ))
            .into()),
        }
    }

    async fn render_overlay(&self, tab_id: TabId, summary: &PageSummary) -> Result<(), HostError> {
        let payload = json!({
            "overview": summary.overview,
            "points": summary.points,
            "keywords": summary.keywords,
        });
        self.host
            .call_function(
                tab_id,
                ExecutionWorld::Isolated,
                OVERLAY_RENDERER,
                vec![Value::String(OVERLAY_ID.to_string()), payload],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "summarizer_tests.rs"]
mod tests;
