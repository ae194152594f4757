//! # pagescript Provider - Gemini
//!
//! Google Gemini `generateContent` provider for pagescript.

mod client;
mod provider;
mod types;

pub use provider::GeminiProvider;
pub use types::*;
