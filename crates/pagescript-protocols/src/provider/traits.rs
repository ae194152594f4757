//! Provider trait definitions.

use std::sync::Arc;

use async_trait::async_trait;

use super::{CompletionRequest, ModelAvailability, SessionOptions};
use crate::error::ProviderError;
use crate::types::ProviderKind;

/// An HTTPS text-completion backend.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Which settings entry this provider serves.
    fn kind(&self) -> ProviderKind;

    /// Model identifier sent to the backend.
    fn model(&self) -> &str;

    /// Issue a single completion request and return the raw text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}

/// A text-generation model running on the local machine.
#[async_trait]
pub trait OnDeviceModel: Send + Sync {
    /// Probe whether the model can be used right now.
    async fn availability(&self) -> Result<ModelAvailability, ProviderError>;

    /// Create a new stateful session bound to the given options.
    async fn create_session(
        &self,
        options: SessionOptions,
    ) -> Result<Arc<dyn ModelSession>, ProviderError>;
}

/// Handle to a stateful model context.
///
/// After `prompt` fails, or after `destroy`, the handle must not be used again.
#[async_trait]
pub trait ModelSession: Send + Sync {
    async fn prompt(&self, input: &str) -> Result<String, ProviderError>;

    /// Release the model context.
    async fn destroy(&self);
}
