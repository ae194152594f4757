//! Script execution in a browser tab.

mod strategy;
mod wrapper;

pub use strategy::{
    DirectCall, InjectionStrategy, PersistentRegistration, StrategyKind, SCRIPT_ID_PREFIX,
};
pub use wrapper::{registration_source, USER_CODE_WRAPPER};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use pagescript_config::{ExecutorConfig, StrategyPreference, WorldPreference};
use pagescript_protocols::{ExecutionResult, ExecutionWorld, ScriptHost, TabId, TabInfo, TabQuery};

use crate::error::CoreError;

/// Runs code in tabs and reports an [`ExecutionResult`] for every attempt.
pub struct ScriptExecutor {
    tabs: Arc<dyn TabQuery>,
    host: Arc<dyn ScriptHost>,
    config: ExecutorConfig,
}

impl ScriptExecutor {
    pub fn new(tabs: Arc<dyn TabQuery>, host: Arc<dyn ScriptHost>, config: ExecutorConfig) -> Self {
        Self { tabs, host, config }
    }

    /// Run code in a tab. Every failure is reported in the result.
    pub async fn execute(&self, tab_id: TabId, code: &str) -> ExecutionResult {
        let executed_at = chrono::Utc::now().timestamp_millis();

        let tab = match self.resolve_target(tab_id).await {
            Ok(tab) => tab,
            Err(e) => {
                warn!("Refusing to run script in tab {}: {}", tab_id, e);
                return ExecutionResult::failed(e.to_string(), executed_at);
            }
        };

        let Some(strategy) = self.select_strategy() else {
            return ExecutionResult::failed(
                "This browser host offers no way to inject scripts",
                executed_at,
            );
        };
        info!("Executing {} bytes in tab {} via {}", code.len(), tab.tab_id, strategy.kind());

        match strategy.inject(&tab, code).await {
            Ok(value) => normalize(value, executed_at),
            Err(e) => {
                warn!("Injection into tab {} failed: {}", tab.tab_id, e);
                ExecutionResult::failed(e.to_string(), executed_at)
            }
        }
    }

    /// Look up a tab and refuse privileged pages.
    pub async fn resolve_target(&self, tab_id: TabId) -> Result<TabInfo, CoreError> {
        let tab = self.tabs.get_tab(tab_id).await?;
        if self.is_privileged(&tab) {
            return Err(CoreError::PrivilegedUrl(tab.url));
        }
        Ok(tab)
    }

    /// Whether the tab's scheme is on the refusal list.
    pub fn is_privileged(&self, tab: &TabInfo) -> bool {
        tab.scheme().is_some_and(|scheme| {
            self.config
                .privileged_schemes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&scheme))
        })
    }

    /// Pick a strategy from the configured preference and what the host
    /// supports right now.
    pub fn select_strategy(&self) -> Option<Box<dyn InjectionStrategy>> {
        let caps = self.host.capabilities();

        match self.config.strategy {
            StrategyPreference::Isolated | StrategyPreference::Main if caps.direct_call => {
                let world = if self.config.strategy == StrategyPreference::Main {
                    ExecutionWorld::Main
                } else {
                    ExecutionWorld::Isolated
                };
                return Some(Box::new(DirectCall::new(self.host.clone(), world)));
            }
            StrategyPreference::Registration if caps.persistent_registration => {
                return Some(Box::new(self.registration()));
            }
            StrategyPreference::Auto => {}
            forced => warn!(
                "Strategy {:?} is not supported by this host, selecting automatically",
                forced
            ),
        }

        if caps.direct_call {
            Some(Box::new(DirectCall::new(self.host.clone(), self.default_world())))
        } else if caps.persistent_registration {
            debug!("Direct calls unavailable, using persistent registration");
            Some(Box::new(self.registration()))
        } else {
            None
        }
    }

    fn registration(&self) -> PersistentRegistration {
        PersistentRegistration::new(
            self.host.clone(),
            self.default_world(),
            Duration::from_millis(self.config.unregister_delay_ms),
        )
    }

    fn default_world(&self) -> ExecutionWorld {
        match self.config.world {
            WorldPreference::Isolated => ExecutionWorld::Isolated,
            WorldPreference::Main => ExecutionWorld::Main,
        }
    }
}

/// Turn whatever the page returned into an [`ExecutionResult`].
///
/// `{success: bool, ...}` envelopes are unpacked; any other value counts as
/// a successful result.
pub fn normalize(value: Value, executed_at: i64) -> ExecutionResult {
    let envelope = value.as_object().and_then(|map| {
        let ok = map.get("success").and_then(Value::as_bool)?;
        Some((ok, map.get("result").cloned(), map.get("error").cloned()))
    });

    match envelope {
        Some((true, result, _)) => ExecutionResult::succeeded(result, executed_at),
        Some((false, _, error)) => {
            let error = match error {
                Some(Value::String(message)) => message,
                Some(Value::Null) | None => "Script execution failed".to_string(),
                Some(other) => other.to_string(),
            };
            ExecutionResult::failed(error, executed_at)
        }
        None if value.is_null() => ExecutionResult::succeeded(None, executed_at),
        None => ExecutionResult::succeeded(Some(value), executed_at),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
