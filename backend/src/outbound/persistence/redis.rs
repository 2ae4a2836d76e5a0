//! Redis-backed key-value store.
//!
//! Uses `bb8-redis` for connection pooling and stores values as JSON text.
//! Prefix reads SCAN with a `MATCH` pattern and fetch the matched keys with
//! a single `MGET`, sorting keys first so listings are stable.

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use serde_json::Value;

use super::{KvStore, KvStoreError};

/// Pooled Redis [`KvStore`].
#[derive(Clone, Debug)]
pub struct RedisKvStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisKvStore {
    /// Connect a pool against the given Redis URL.
    ///
    /// # Errors
    ///
    /// Returns [`KvStoreError::Connection`] when the URL is invalid or the
    /// pool cannot be established.
    pub async fn connect(url: &str) -> Result<Self, KvStoreError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|err| KvStoreError::connection(err.to_string()))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| KvStoreError::connection(err.to_string()))?;
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<bb8_redis::bb8::PooledConnection<'_, RedisConnectionManager>, KvStoreError> {
        self.pool
            .get()
            .await
            .map_err(|err| KvStoreError::connection(err.to_string()))
    }
}

fn decode(raw: &str) -> Result<Value, KvStoreError> {
    serde_json::from_str(raw).map_err(|err| KvStoreError::serialization(err.to_string()))
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, KvStoreError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|err| KvStoreError::query(err.to_string()))?;
        raw.as_deref().map(decode).transpose()
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), KvStoreError> {
        let encoded = serde_json::to_string(&value)
            .map_err(|err| KvStoreError::serialization(err.to_string()))?;
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(key, encoded)
            .await
            .map_err(|err| KvStoreError::query(err.to_string()))
    }

    async fn del(&self, key: &str) -> Result<(), KvStoreError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key)
            .await
            .map_err(|err| KvStoreError::query(err.to_string()))
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, KvStoreError> {
        let mut conn = self.connection().await?;
        let pattern = format!("{prefix}*");

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = bb8_redis::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .query_async(&mut *conn)
                .await
                .map_err(|err| KvStoreError::query(err.to_string()))?;
            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        keys.sort_unstable();

        let raw: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .map_err(|err| KvStoreError::query(err.to_string()))?;
        raw.into_iter()
            .flatten()
            .map(|entry| decode(&entry))
            .collect()
    }
}
