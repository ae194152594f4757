//! # pagescript Protocols
//!
//! Core protocol definitions for pagescript.
//! Contains only the data model, the message contract and interface
//! definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`CloudProvider`] - HTTPS text-completion backends that need an API key
//! - [`OnDeviceModel`] / [`ModelSession`] - local model with a stateful session
//! - [`TabQuery`] - lookup of browser tabs
//! - [`ScriptHost`] - script injection into a tab (direct call or registration)
//! - [`KeyValueStore`] - settings persistence

pub mod error;
pub mod host;
pub mod message;
pub mod provider;
pub mod store;
pub mod types;

// Re-export core traits
pub use host::{
    ExecutionWorld, InjectionCapabilities, MatchPattern, RegisteredScript, RunAt, ScriptHost,
    TabQuery,
};
pub use message::{Request, Response};
pub use provider::{
    CloudProvider, CompletionRequest, ModelAvailability, ModelSession, OnDeviceModel,
    SessionOptions,
};
pub use store::KeyValueStore;
pub use error::{HostError, ProtocolError, ProviderError, StoreError};
pub use types::*;
