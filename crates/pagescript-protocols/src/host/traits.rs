//! Host trait definitions.

use async_trait::async_trait;
use serde_json::Value;

use super::{ExecutionWorld, InjectionCapabilities, RegisteredScript};
use crate::error::HostError;
use crate::types::{TabId, TabInfo};

/// Tab lookup.
#[async_trait]
pub trait TabQuery: Send + Sync {
    /// The tab the user is currently looking at, if any.
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError>;

    /// Look up a tab by id.
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, HostError>;
}

/// Script injection into tabs.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Mechanisms available on this host.
    fn capabilities(&self) -> InjectionCapabilities;

    /// Call a JavaScript function declaration with JSON arguments in the given
    /// world and return its (awaited) JSON-serializable return value.
    async fn call_function(
        &self,
        tab_id: TabId,
        world: ExecutionWorld,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, HostError>;

    /// Register scripts that run on every matching page load.
    async fn register_scripts(&self, scripts: Vec<RegisteredScript>) -> Result<(), HostError>;

    /// Remove registrations by id. Unknown ids are ignored.
    async fn unregister_scripts(&self, ids: &[String]) -> Result<(), HostError>;

    /// Scripts currently registered by this process.
    async fn registered_scripts(&self) -> Result<Vec<RegisteredScript>, HostError>;

    /// Start a full reload of the tab. Does not wait for the load to finish.
    async fn reload(&self, tab_id: TabId) -> Result<(), HostError>;
}
