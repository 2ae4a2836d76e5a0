//! Repository ports implemented over the key-value store.
//!
//! Each repository owns its key layout and serde mapping; the store itself
//! stays schemaless. Store failures map one-to-one onto the corresponding
//! port error variants.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, FeedRepository, FeedRepositoryError,
    ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{AccountId, ConnectedAccount, StoredFeed, UserId, UserProfile};

use super::{KvStore, KvStoreError};

fn profile_key(user_id: &UserId) -> String {
    format!("user:{user_id}")
}

fn account_prefix(user_id: &UserId) -> String {
    format!("account:{user_id}:")
}

fn account_key(user_id: &UserId, account_id: &AccountId) -> String {
    format!("account:{user_id}:{account_id}")
}

fn feed_key(user_id: &UserId) -> String {
    format!("feed:{user_id}")
}

macro_rules! map_kv_error {
    ($fn_name:ident, $error:ident) => {
        fn $fn_name(error: KvStoreError) -> $error {
            match error {
                KvStoreError::Connection { message } => $error::connection(message),
                KvStoreError::Query { message } => $error::query(message),
                KvStoreError::Serialization { message } => $error::serialization(message),
            }
        }
    };
}

map_kv_error!(map_profile_error, ProfileRepositoryError);
map_kv_error!(map_account_error, AccountRepositoryError);
map_kv_error!(map_feed_error, FeedRepositoryError);

/// [`ProfileRepository`] over a [`KvStore`].
#[derive(Clone)]
pub struct KvProfileRepository {
    kv: Arc<dyn KvStore>,
}

impl KvProfileRepository {
    /// Create a repository over the given store.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl ProfileRepository for KvProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let value = self
            .kv
            .get(&profile_key(user_id))
            .await
            .map_err(map_profile_error)?;
        value
            .map(serde_json::from_value)
            .transpose()
            .map_err(|err| ProfileRepositoryError::serialization(err.to_string()))
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError> {
        let value = serde_json::to_value(profile)
            .map_err(|err| ProfileRepositoryError::serialization(err.to_string()))?;
        self.kv
            .set(&profile_key(profile.id()), value)
            .await
            .map_err(map_profile_error)
    }
}

/// [`AccountRepository`] over a [`KvStore`].
#[derive(Clone)]
pub struct KvAccountRepository {
    kv: Arc<dyn KvStore>,
}

impl KvAccountRepository {
    /// Create a repository over the given store.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl AccountRepository for KvAccountRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConnectedAccount>, AccountRepositoryError> {
        let values = self
            .kv
            .get_by_prefix(&account_prefix(user_id))
            .await
            .map_err(map_account_error)?;
        values
            .into_iter()
            .map(|value: Value| {
                serde_json::from_value(value)
                    .map_err(|err| AccountRepositoryError::serialization(err.to_string()))
            })
            .collect()
    }

    async fn insert(&self, account: &ConnectedAccount) -> Result<(), AccountRepositoryError> {
        let value = serde_json::to_value(account)
            .map_err(|err| AccountRepositoryError::serialization(err.to_string()))?;
        self.kv
            .set(&account_key(account.user_id(), account.id()), value)
            .await
            .map_err(map_account_error)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        account_id: &AccountId,
    ) -> Result<(), AccountRepositoryError> {
        self.kv
            .del(&account_key(user_id, account_id))
            .await
            .map_err(map_account_error)
    }
}

/// [`FeedRepository`] over a [`KvStore`].
#[derive(Clone)]
pub struct KvFeedRepository {
    kv: Arc<dyn KvStore>,
}

impl KvFeedRepository {
    /// Create a repository over the given store.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl FeedRepository for KvFeedRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<StoredFeed>, FeedRepositoryError> {
        let value = self
            .kv
            .get(&feed_key(user_id))
            .await
            .map_err(map_feed_error)?;
        value
            .map(serde_json::from_value)
            .transpose()
            .map_err(|err| FeedRepositoryError::serialization(err.to_string()))
    }

    async fn save(&self, user_id: &UserId, feed: &StoredFeed) -> Result<(), FeedRepositoryError> {
        let value = serde_json::to_value(feed)
            .map_err(|err| FeedRepositoryError::serialization(err.to_string()))?;
        self.kv
            .set(&feed_key(user_id), value)
            .await
            .map_err(map_feed_error)
    }
}
