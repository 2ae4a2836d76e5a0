//! Key-value persistence adapters.
//!
//! Repository ports are implemented as thin typed layers over a shared
//! [`KvStore`] abstraction mirroring the product's storage layout:
//!
//! - `user:{user_id}` → profile record
//! - `account:{user_id}:{account_id}` → connected account record
//! - `feed:{user_id}` → stored feed document
//!
//! Two backends exist: a Redis-backed store for deployments and an
//! in-memory store for development and tests.

mod kv_repositories;
mod memory;
mod redis;

pub use kv_repositories::{KvAccountRepository, KvFeedRepository, KvProfileRepository};
pub use memory::InMemoryKvStore;
pub use redis::RedisKvStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::define_port_error;

define_port_error! {
    /// Errors raised by key-value store backends.
    pub enum KvStoreError {
        /// Backend connection could not be established.
        Connection { message: String } =>
            "kv store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "kv store query failed: {message}",
        /// Stored value could not be encoded or decoded as JSON.
        Serialization { message: String } =>
            "kv store value serialization failed: {message}",
    }
}

/// Schemaless JSON key-value store.
///
/// Keys are flat strings namespaced by colon-separated prefixes; values are
/// arbitrary JSON documents. `get_by_prefix` returns values in ascending
/// key order so listings are stable across calls.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, KvStoreError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<(), KvStoreError>;

    /// Delete `key`. Idempotent: deleting an absent key succeeds.
    async fn del(&self, key: &str) -> Result<(), KvStoreError>;

    /// All values whose keys start with `prefix`, in ascending key order.
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, KvStoreError>;
}
