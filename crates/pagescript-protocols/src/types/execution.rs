//! Script execution outcome.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one execution attempt. Immutable once built, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time (epoch millis) at which execution began.
    pub executed_at: i64,
}

impl ExecutionResult {
    pub fn succeeded(result: Option<Value>, executed_at: i64) -> Self {
        Self {
            success: true,
            result,
            error: None,
            executed_at,
        }
    }

    pub fn failed(error: impl Into<String>, executed_at: i64) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            executed_at,
        }
    }
}
