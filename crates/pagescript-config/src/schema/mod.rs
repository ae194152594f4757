//! Configuration schema definitions.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod schema_providers;
mod schema_runtime;

pub use schema_providers::*;
pub use schema_runtime::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub summary: SummaryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON key-value file holding user settings.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    "~/.pagescript/storage.json".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write a daily rolling log file in addition to stderr.
    #[serde(default = "default_true")]
    pub file: bool,

    /// Directory for log files.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_true(),
            dir: default_log_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    pagescript_home().join("logs")
}

/// `~/.pagescript`, falling back to the working directory without a home.
pub fn pagescript_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pagescript")
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
