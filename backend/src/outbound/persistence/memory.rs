//! In-memory key-value store for development and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{KvStore, KvStoreError};

/// Process-local [`KvStore`] backed by an ordered map.
///
/// Data lives for the lifetime of the process only; the server falls back
/// to this store when no Redis URL is configured and logs a warning.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryKvStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, KvStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), KvStoreError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), KvStoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, KvStoreError> {
        let entries = self.entries.read().await;
        // BTreeMap range scan: start at the prefix and stop at the first
        // non-matching key.
        Ok(entries
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, value)| value.clone())
            .collect())
    }
}
