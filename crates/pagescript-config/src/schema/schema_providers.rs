//! Text-generation backend configuration (Gemini, OpenAI, on-device).

use serde::{Deserialize, Serialize};

/// Per-backend configuration. API keys are user settings, not config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub on_device: OnDeviceConfig,
}

/// Gemini `generateContent` backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// OpenAI chat-completions backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Full chat-completions endpoint URL.
    #[serde(default = "default_openai_api_url")]
    pub api_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            api_url: default_openai_api_url(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

/// Local model daemon on the loopback interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnDeviceConfig {
    #[serde(default = "default_on_device_base_url")]
    pub base_url: String,

    #[serde(default = "default_on_device_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

impl Default for OnDeviceConfig {
    fn default() -> Self {
        Self {
            base_url: default_on_device_base_url(),
            model: default_on_device_model(),
            temperature: default_temperature(),
            top_k: default_top_k(),
        }
    }
}

fn default_on_device_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_on_device_model() -> String {
    "gemma3:1b".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_top_k() -> u32 {
    3
}

fn default_max_output_tokens() -> u32 {
    2048
}
