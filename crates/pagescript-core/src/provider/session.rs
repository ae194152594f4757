//! Single-slot cache for the on-device model session.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use pagescript_protocols::{ModelSession, OnDeviceModel, ProviderError, SessionOptions};

struct CachedSession {
    options: SessionOptions,
    session: Arc<dyn ModelSession>,
}

/// Holds at most one live session.
///
/// A session is created on first use and reused while the options (system
/// prompt, decoding) stay the same. Any prompt failure destroys it, so the
/// next call starts from a fresh context.
#[derive(Default)]
pub struct SessionSlot {
    slot: Mutex<Option<CachedSession>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt the cached session, creating it first if needed.
    ///
    /// The slot stays locked for the whole prompt, so a session never serves
    /// two prompts at once.
    pub async fn prompt(
        &self,
        model: &dyn OnDeviceModel,
        options: SessionOptions,
        input: &str,
    ) -> Result<String, ProviderError> {
        let mut slot = self.slot.lock().await;

        if slot.as_ref().is_some_and(|cached| cached.options != options) {
            if let Some(old) = slot.take() {
                debug!("Session options changed, destroying cached session");
                old.session.destroy().await;
            }
        }

        let session = match slot.as_ref() {
            Some(cached) => cached.session.clone(),
            None => {
                debug!("Creating on-device session");
                let session = model.create_session(options.clone()).await?;
                *slot = Some(CachedSession {
                    options,
                    session: session.clone(),
                });
                session
            }
        };

        match session.prompt(input).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("On-device prompt failed, discarding session: {}", e);
                if let Some(broken) = slot.take() {
                    broken.session.destroy().await;
                }
                Err(e)
            }
        }
    }

    /// Destroy the cached session, if any.
    pub async fn reset(&self) {
        if let Some(cached) = self.slot.lock().await.take() {
            debug!("Resetting on-device session");
            cached.session.destroy().await;
        }
    }

    pub async fn is_live(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}
