//! Injection strategies.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use pagescript_protocols::{
    ExecutionWorld, HostError, MatchPattern, RegisteredScript, RunAt, ScriptHost, TabInfo,
};

use super::wrapper::{registration_source, USER_CODE_WRAPPER};

/// Prefix of every script id this process registers.
pub const SCRIPT_ID_PREFIX: &str = "pagescript-";

/// Which mechanism carried the code into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    IsolatedCall,
    MainWorldCall,
    Registration,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::IsolatedCall => "isolated-world call",
            StrategyKind::MainWorldCall => "main-world call",
            StrategyKind::Registration => "persistent registration",
        };
        f.write_str(name)
    }
}

/// A way to run code in a tab.
#[async_trait]
pub trait InjectionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Run the code and return whatever the page reported.
    async fn inject(&self, tab: &TabInfo, code: &str) -> Result<Value, HostError>;
}

/// One-shot call of the wrapped code in a chosen world.
pub struct DirectCall {
    host: Arc<dyn ScriptHost>,
    world: ExecutionWorld,
}

impl DirectCall {
    pub fn new(host: Arc<dyn ScriptHost>, world: ExecutionWorld) -> Self {
        Self { host, world }
    }
}

#[async_trait]
impl InjectionStrategy for DirectCall {
    fn kind(&self) -> StrategyKind {
        match self.world {
            ExecutionWorld::Isolated => StrategyKind::IsolatedCall,
            ExecutionWorld::Main => StrategyKind::MainWorldCall,
        }
    }

    async fn inject(&self, tab: &TabInfo, code: &str) -> Result<Value, HostError> {
        self.host
            .call_function(
                tab.tab_id,
                self.world,
                USER_CODE_WRAPPER,
                vec![Value::String(code.to_string())],
            )
            .await
    }
}

/// Register the code for the tab's origin, reload, and remove the
/// registration again after a delay.
///
/// The result only says the registration went through; whether the script
/// ran after the reload is not observed.
pub struct PersistentRegistration {
    host: Arc<dyn ScriptHost>,
    world: ExecutionWorld,
    unregister_delay: Duration,
}

impl PersistentRegistration {
    pub fn new(host: Arc<dyn ScriptHost>, world: ExecutionWorld, unregister_delay: Duration) -> Self {
        Self {
            host,
            world,
            unregister_delay,
        }
    }

    /// Remove every leftover registration of this process.
    async fn sweep(&self) -> Result<(), HostError> {
        let stale: Vec<String> = self
            .host
            .registered_scripts()
            .await?
            .into_iter()
            .map(|script| script.id)
            .filter(|id| id.starts_with(SCRIPT_ID_PREFIX))
            .collect();

        if !stale.is_empty() {
            debug!("Sweeping {} stale registration(s)", stale.len());
            self.host.unregister_scripts(&stale).await?;
        }
        Ok(())
    }

    fn schedule_unregister(&self, id: String) {
        let host = self.host.clone();
        let delay = self.unregister_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Only this id: a newer registration may exist by now.
            if let Err(e) = host.unregister_scripts(std::slice::from_ref(&id)).await {
                warn!("Failed to unregister script {}: {}", id, e);
            } else {
                debug!("Unregistered script {}", id);
            }
        });
    }
}

#[async_trait]
impl InjectionStrategy for PersistentRegistration {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Registration
    }

    async fn inject(&self, tab: &TabInfo, code: &str) -> Result<Value, HostError> {
        self.sweep().await?;

        let pattern = MatchPattern::for_origin(&tab.url)
            .map_err(|e| HostError::Injection(e.to_string()))?;
        let id = format!("{}{}", SCRIPT_ID_PREFIX, Uuid::new_v4());
        let matches = vec![pattern.to_string()];

        self.host
            .register_scripts(vec![RegisteredScript {
                id: id.clone(),
                matches: matches.clone(),
                source: registration_source(code),
                world: self.world,
                run_at: RunAt::DocumentEnd,
            }])
            .await?;
        debug!("Registered script {} for {}", id, pattern);

        self.schedule_unregister(id.clone());
        self.host.reload(tab.tab_id).await?;

        Ok(json!({ "registered": id, "matches": matches }))
    }
}
