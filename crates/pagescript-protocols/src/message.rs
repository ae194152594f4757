//! Request/response contract between a caller (popup, CLI, native host) and
//! the service.
//!
//! Messages are JSON objects tagged by `type`, for example
//! `{"type":"EXECUTE_SCRIPT","code":"...","tabId":3}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::types::{AiStatus, ExecutionResult, PageSummary, ProviderKind, Settings, TabId};

/// A request sent to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    CheckAiStatus,
    GenerateScript {
        prompt: String,
    },
    ExecuteScript {
        code: String,
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    GetCurrentTab,
    SummarizePage {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    GetSettings,
    SaveSettings {
        settings: Settings,
    },
}

impl Request {
    /// Every `type` tag a request may carry.
    pub const TYPES: &'static [&'static str] = &[
        "CHECK_AI_STATUS",
        "GENERATE_SCRIPT",
        "EXECUTE_SCRIPT",
        "GET_CURRENT_TAB",
        "SUMMARIZE_PAGE",
        "GET_SETTINGS",
        "SAVE_SETTINGS",
    ];

    /// Parse a request, telling apart unknown message types from malformed
    /// messages of a known type.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ProtocolError::MalformedMessage(e.to_string()))?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::MalformedMessage("missing \"type\" field".to_string()))?;
        if !Self::TYPES.contains(&kind) {
            return Err(ProtocolError::UnknownMessageType(kind.to_string()));
        }
        serde_json::from_value(value).map_err(|e| ProtocolError::MalformedMessage(e.to_string()))
    }

    /// The `type` tag of this request.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::CheckAiStatus => "CHECK_AI_STATUS",
            Request::GenerateScript { .. } => "GENERATE_SCRIPT",
            Request::ExecuteScript { .. } => "EXECUTE_SCRIPT",
            Request::GetCurrentTab => "GET_CURRENT_TAB",
            Request::SummarizePage { .. } => "SUMMARIZE_PAGE",
            Request::GetSettings => "GET_SETTINGS",
            Request::SaveSettings { .. } => "SAVE_SETTINGS",
        }
    }
}

/// A response returned by the service. Every request yields exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    AiStatus {
        status: AiStatus,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        provider: Option<ProviderKind>,
    },
    ScriptGenerated {
        code: String,
    },
    ScriptExecuted {
        result: ExecutionResult,
    },
    CurrentTab {
        #[serde(rename = "tabId")]
        tab_id: TabId,
        url: String,
    },
    SummarizeResult {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<PageSummary>,
    },
    Settings {
        settings: Settings,
    },
    SettingsSaved,
    Error {
        message: String,
    },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
