//! Key-value persistence protocol.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// A local key-value store holding JSON values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}
