//! Key-value stores and typed settings access.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use tracing::{debug, warn};

use pagescript_protocols::{KeyValueStore, Settings, StoreError};

/// Reads and writes [`Settings`] under their storage key.
#[derive(Clone)]
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored settings, or the defaults when nothing usable is stored.
    pub async fn load(&self) -> Result<Settings, StoreError> {
        let Some(value) = self.store.get(Settings::STORAGE_KEY).await? else {
            return Ok(Settings::default());
        };
        match serde_json::from_value(value) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("Stored settings are unreadable, using defaults: {}", e);
                Ok(Settings::default())
            }
        }
    }

    pub async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let value = serde_json::to_value(settings)?;
        self.store.set(Settings::STORAGE_KEY, value).await?;
        debug!("Saved settings: {:?}", settings);
        Ok(())
    }
}
