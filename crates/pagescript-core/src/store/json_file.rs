//! Key-value store persisted as one JSON object on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::debug;

use pagescript_protocols::{KeyValueStore, StoreError};

/// File-backed store. The whole object is rewritten on every `set`.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let json = tokio::fs::read_to_string(&self.path).await?;
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&json)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Backend(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(values))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Wrote {} to {:?}", key, self.path);
        Ok(())
    }
}
