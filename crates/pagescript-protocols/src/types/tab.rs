//! Browser tab identity.

use serde::{Deserialize, Serialize};

/// Numeric tab identifier, stable for the lifetime of the tab.
pub type TabId = u64;

/// A browser tab as seen by the tab query capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub tab_id: TabId,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TabInfo {
    pub fn new(tab_id: TabId, url: impl Into<String>) -> Self {
        Self {
            tab_id,
            url: url.into(),
            title: None,
        }
    }

    /// URL scheme without the trailing colon, lowercased.
    pub fn scheme(&self) -> Option<String> {
        self.url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .filter(|s| !s.is_empty() && !s.contains('/'))
    }
}
