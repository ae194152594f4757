//! Ollama API types.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

/// Request for `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: &'a str,
    pub options: GenerateOptions,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub top_k: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub context: Option<Vec<i64>>,
}

/// Error body returned by the daemon.
#[derive(Debug, Deserialize)]
pub struct OllamaError {
    pub error: String,
}

/// Whether a tag from the model list names the configured model. A model
/// configured without a tag matches its `:latest` variant.
pub fn tag_matches(tag: &str, model: &str) -> bool {
    if tag == model {
        return true;
    }
    !model.contains(':') && tag.strip_suffix(":latest") == Some(model)
}
