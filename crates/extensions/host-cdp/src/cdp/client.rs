//! CDP client: endpoint discovery, tab listing and page attachment.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::error::CdpError;
use super::protocol::{BrowserVersion, PageInfo};
use super::session::PageSession;
use super::transport::Transport;

/// CDP client for a browser exposing a remote debugging endpoint.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    browser: String,
    http: reqwest::Client,
    transport: Arc<Transport>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint (e.g. `http://127.0.0.1:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let parsed = url::Url::parse(endpoint)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CdpError::ConnectionFailed(format!(
                "Endpoint must be http(s): {}",
                endpoint
            )));
        }
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        let http = reqwest::Client::new();

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = http
            .get(&version_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        let transport = Transport::connect(&version.web_socket_debugger_url).await?;
        debug!("CDP client connected to {} ({})", version.browser, version.web_socket_debugger_url);

        Ok(Self {
            http_endpoint,
            browser: version.browser,
            http,
            transport,
        })
    }

    /// Browser product string, e.g. `Chrome/126.0.6478.126`.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// List open targets in the order the browser reports them.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        let pages: Vec<PageInfo> = self.http.get(&url).send().await?.json().await?;
        Ok(pages)
    }

    /// Attach to an existing page and enable the domains the host uses.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .transport
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
                None,
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(target_id.to_string(), session_id, self.transport.clone());
        session.enable_domains().await?;
        Ok(session)
    }
}
