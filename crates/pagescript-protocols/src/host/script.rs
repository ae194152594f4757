//! Injection worlds and persistent script registrations.

use serde::{Deserialize, Serialize};

/// JavaScript context in which injected code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionWorld {
    /// Sandboxed context that cannot see page-defined globals.
    #[default]
    Isolated,
    /// The page's own context, sharing its globals.
    Main,
}

/// Page lifecycle point at which a registered script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAt {
    DocumentStart,
    /// After the document has been parsed.
    #[default]
    DocumentEnd,
    DocumentIdle,
}

/// A script registered against URL match patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredScript {
    pub id: String,
    pub matches: Vec<String>,
    pub source: String,
    #[serde(default)]
    pub world: ExecutionWorld,
    #[serde(default)]
    pub run_at: RunAt,
}

/// Injection mechanisms a host supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionCapabilities {
    /// One-shot function call in a chosen world with a return value.
    pub direct_call: bool,
    /// Register scripts by URL pattern and reload the tab.
    pub persistent_registration: bool,
}

impl InjectionCapabilities {
    pub fn all() -> Self {
        Self {
            direct_call: true,
            persistent_registration: true,
        }
    }

    pub fn none() -> Self {
        Self {
            direct_call: false,
            persistent_registration: false,
        }
    }
}
