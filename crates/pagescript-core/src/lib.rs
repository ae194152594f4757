//! # pagescript Core
//!
//! The pieces between a natural-language instruction and a result in a tab.
//!
//! ## Components
//!
//! - [`ProviderClient`] - one switch over the on-device model and the cloud providers
//! - [`extract_code`] - normalizes raw model text into runnable source
//! - [`ScriptExecutor`] - runs code in a tab through an [`InjectionStrategy`]
//! - [`Summarizer`] - page text extraction, summary prompt and overlay
//! - [`Service`] - request/response message handler over all of the above
//!
//! Data flows instruction -> provider -> extractor -> executor -> result.

pub mod error;
pub mod executor;
pub mod extractor;
pub mod prompts;
pub mod provider;
pub mod service;
pub mod store;
pub mod summarizer;

#[cfg(test)]
mod testing;

pub use error::CoreError;
pub use executor::{InjectionStrategy, ScriptExecutor, StrategyKind};
pub use extractor::extract_code;
pub use provider::{CloudProviders, ProviderClient};
pub use service::Service;
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use summarizer::Summarizer;
