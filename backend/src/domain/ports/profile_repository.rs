//! Driven port for user profile persistence.

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "profile store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "profile store query failed: {message}",
        /// Stored record could not be encoded or decoded.
        Serialization { message: String } =>
            "profile record serialization failed: {message}",
    }
}

/// Port for profile record storage and retrieval.
///
/// One record per user, keyed by the provider-issued user id. Records are
/// written at signup and read on every authenticated request; there is no
/// delete operation because users are never deleted in-code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile for a user, `None` when no record exists yet.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError>;

    /// Persist a profile record, overwriting any previous value.
    async fn save(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups always miss and saves are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _profile: &UserProfile) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }
}
