//! Browser host over CDP.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use pagescript_config::BrowserConfig;
use pagescript_protocols::{
    ExecutionWorld, HostError, InjectionCapabilities, RegisteredScript, ScriptHost, TabId, TabInfo,
    TabQuery,
};

use crate::cdp::{CdpClient, CdpError, PageInfo, PageSession};
use crate::registration::guarded_source;
use crate::tabs::TabTable;

/// A registration and the per-page identifiers CDP returned for it.
struct Installed {
    script: RegisteredScript,
    identifiers: Vec<(String, String)>,
}

/// Tab query and script host backed by a Chrome remote debugging endpoint.
///
/// Registrations are installed on every page open at registration time;
/// pages opened afterwards are not covered.
pub struct CdpHost {
    client: CdpClient,
    tabs: TabTable,
    sessions: DashMap<String, Arc<PageSession>>,
    installed: Mutex<HashMap<String, Installed>>,
    capabilities: InjectionCapabilities,
    world_name: String,
}

impl CdpHost {
    /// Connect to the browser named in the configuration.
    pub async fn connect(config: &BrowserConfig) -> Result<Self, HostError> {
        let client = CdpClient::connect(&config.endpoint).await?;
        info!("Connected to {} at {}", client.browser(), config.endpoint);
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: CdpClient, config: &BrowserConfig) -> Self {
        Self {
            client,
            tabs: TabTable::new(),
            sessions: DashMap::new(),
            installed: Mutex::new(HashMap::new()),
            capabilities: InjectionCapabilities {
                direct_call: config.direct_call,
                persistent_registration: true,
            },
            world_name: config.world_name.clone(),
        }
    }

    async fn pages(&self) -> Result<Vec<PageInfo>, HostError> {
        let pages = self.client.list_pages().await?;
        Ok(pages.into_iter().filter(PageInfo::is_page).collect())
    }

    /// Bind ids to every listed page in list order, so a fresh process hands
    /// out the same ids a previous one did for an unchanged page list.
    fn index_pages(&self, pages: &[PageInfo]) {
        for page in pages {
            self.tabs.id_for(&page.id);
        }
    }

    /// Target id for a tab id, listing pages when the id is not bound yet.
    async fn target_for_tab(&self, tab_id: TabId) -> Result<String, HostError> {
        if let Some(target_id) = self.tabs.target_for(tab_id) {
            return Ok(target_id);
        }
        self.index_pages(&self.pages().await?);
        self.tabs
            .target_for(tab_id)
            .ok_or(HostError::TabNotFound(tab_id))
    }

    fn tab_info(&self, page: &PageInfo) -> TabInfo {
        let mut info = TabInfo::new(self.tabs.id_for(&page.id), page.url.clone());
        if !page.title.is_empty() {
            info.title = Some(page.title.clone());
        }
        info
    }

    async fn session_for_target(&self, target_id: &str) -> Result<Arc<PageSession>, HostError> {
        if let Some(session) = self.sessions.get(target_id) {
            return Ok(session.clone());
        }
        let session = Arc::new(self.client.attach_page(target_id).await?);
        debug!("Attached to target {} (session {})", target_id, session.session_id());
        self.sessions.insert(target_id.to_string(), session.clone());
        Ok(session)
    }

    async fn session_for_tab(&self, tab_id: TabId) -> Result<Arc<PageSession>, HostError> {
        let target_id = self.target_for_tab(tab_id).await?;
        self.session_for_target(&target_id).await
    }

    /// Drop a cached session whose page has gone away.
    fn evict_if_detached(&self, session: &PageSession, error: &CdpError) {
        if error.is_detached() {
            debug!("Dropping detached session for target {}", session.target_id());
            self.sessions.remove(session.target_id());
        }
    }

    async fn run_in_world(
        &self,
        session: &PageSession,
        world: ExecutionWorld,
        function: &str,
        args: &[Value],
    ) -> Result<Value, CdpError> {
        match world {
            ExecutionWorld::Isolated => {
                let context_id = session.create_isolated_world(&self.world_name).await?;
                session.call_function_in_context(context_id, function, args).await
            }
            ExecutionWorld::Main => {
                let args = serde_json::to_string(args)?;
                let expression = format!("({})(...{})", function, args);
                session.evaluate(&expression).await
            }
        }
    }
}

#[async_trait]
impl TabQuery for CdpHost {
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError> {
        // The endpoint lists the most recently focused page first.
        let pages = self.pages().await?;
        self.index_pages(&pages);
        Ok(pages.first().map(|page| self.tab_info(page)))
    }

    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, HostError> {
        let pages = self.pages().await?;
        self.index_pages(&pages);
        let target_id = self
            .tabs
            .target_for(tab_id)
            .ok_or(HostError::TabNotFound(tab_id))?;
        pages
            .iter()
            .find(|page| page.id == target_id)
            .map(|page| self.tab_info(page))
            .ok_or(HostError::TabNotFound(tab_id))
    }
}

#[async_trait]
impl ScriptHost for CdpHost {
    fn capabilities(&self) -> InjectionCapabilities {
        self.capabilities
    }

    #[instrument(skip(self, function, args))]
    async fn call_function(
        &self,
        tab_id: TabId,
        world: ExecutionWorld,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, HostError> {
        if !self.capabilities.direct_call {
            return Err(HostError::Unsupported("direct function call".to_string()));
        }
        let session = self.session_for_tab(tab_id).await?;
        match self.run_in_world(&session, world, function, &args).await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.evict_if_detached(&session, &e);
                Err(e.into())
            }
        }
    }

    async fn register_scripts(&self, scripts: Vec<RegisteredScript>) -> Result<(), HostError> {
        let pages = self.pages().await?;
        let mut installed = self.installed.lock().await;

        for script in scripts {
            if installed.contains_key(&script.id) {
                return Err(HostError::Injection(format!(
                    "Duplicate script ID '{}'",
                    script.id
                )));
            }
            let source = guarded_source(&script)?;
            let world_name = match script.world {
                ExecutionWorld::Isolated => Some(self.world_name.as_str()),
                ExecutionWorld::Main => None,
            };

            let mut identifiers = Vec::with_capacity(pages.len());
            for page in &pages {
                let session = self.session_for_target(&page.id).await?;
                match session.add_script_on_new_document(&source, world_name).await {
                    Ok(identifier) => identifiers.push((page.id.clone(), identifier)),
                    Err(e) => {
                        self.evict_if_detached(&session, &e);
                        warn!("Could not install {} on target {}: {}", script.id, page.id, e);
                    }
                }
            }

            debug!("Registered {} on {} page(s)", script.id, identifiers.len());
            installed.insert(script.id.clone(), Installed { script, identifiers });
        }
        Ok(())
    }

    async fn unregister_scripts(&self, ids: &[String]) -> Result<(), HostError> {
        let removed: Vec<Installed> = {
            let mut installed = self.installed.lock().await;
            ids.iter().filter_map(|id| installed.remove(id)).collect()
        };

        for entry in removed {
            for (target_id, identifier) in &entry.identifiers {
                let Some(session) = self.sessions.get(target_id).map(|s| s.clone()) else {
                    continue;
                };
                if let Err(e) = session.remove_script_on_new_document(identifier).await {
                    self.evict_if_detached(&session, &e);
                    debug!("Could not remove {} from {}: {}", entry.script.id, target_id, e);
                }
            }
            debug!("Unregistered {}", entry.script.id);
        }
        Ok(())
    }

    async fn registered_scripts(&self) -> Result<Vec<RegisteredScript>, HostError> {
        let installed = self.installed.lock().await;
        Ok(installed.values().map(|entry| entry.script.clone()).collect())
    }

    async fn reload(&self, tab_id: TabId) -> Result<(), HostError> {
        let session = self.session_for_tab(tab_id).await?;
        if let Err(e) = session.reload().await {
            self.evict_if_detached(&session, &e);
            return Err(e.into());
        }
        Ok(())
    }
}
