//! OpenAI chat-completions provider for pagescript.

mod api;
mod provider;

pub use provider::OpenAiProvider;
