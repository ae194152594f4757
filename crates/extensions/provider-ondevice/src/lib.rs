//! # pagescript Provider - On-device
//!
//! Local text generation through an Ollama daemon on the loopback interface.
//! Availability is probed from the daemon's model list; sessions keep the
//! daemon's context vector between prompts.

mod model;
mod session;
mod types;

pub use model::OllamaModel;
pub use session::OllamaSession;
