//! Execution, browser and summary configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Which injection strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyPreference {
    /// Direct call if the host supports it, registration otherwise.
    #[default]
    Auto,
    Isolated,
    Main,
    Registration,
}

/// World used by direct calls under `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldPreference {
    #[default]
    Isolated,
    Main,
}

/// Script executor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    #[serde(default)]
    pub strategy: StrategyPreference,

    #[serde(default)]
    pub world: WorldPreference,

    /// Delay before a registered script is removed again.
    #[serde(default = "default_unregister_delay_ms")]
    pub unregister_delay_ms: u64,

    /// URL schemes where script execution is refused.
    #[serde(default = "default_privileged_schemes")]
    pub privileged_schemes: Vec<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyPreference::default(),
            world: WorldPreference::default(),
            unregister_delay_ms: default_unregister_delay_ms(),
            privileged_schemes: default_privileged_schemes(),
        }
    }
}

fn default_unregister_delay_ms() -> u64 {
    3000
}

fn default_privileged_schemes() -> Vec<String> {
    [
        "chrome",
        "chrome-extension",
        "chrome-search",
        "chrome-untrusted",
        "edge",
        "brave",
        "about",
        "devtools",
        "view-source",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Browser connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Whether the host may use one-shot function calls. Turning this off
    /// leaves only persistent registration.
    #[serde(default = "default_true")]
    pub direct_call: bool,

    /// Name of the isolated world created in pages.
    #[serde(default = "default_world_name")]
    pub world_name: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            direct_call: default_true(),
            world_name: default_world_name(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:9222".to_string()
}

fn default_world_name() -> String {
    "pagescript".to_string()
}

/// Page summary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Page text budget in characters before truncation.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Output language, regardless of the page's language.
    #[serde(default = "default_language")]
    pub language: String,

    /// Render the summary as an in-page overlay.
    #[serde(default = "default_true")]
    pub overlay: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            language: default_language(),
            overlay: default_true(),
        }
    }
}

fn default_max_chars() -> usize {
    15_000
}

fn default_language() -> String {
    "English".to_string()
}
