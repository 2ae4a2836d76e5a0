//! Driven port for connected-account persistence.

use async_trait::async_trait;

use crate::domain::{AccountId, ConnectedAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "account store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "account store query failed: {message}",
        /// Stored record could not be encoded or decoded.
        Serialization { message: String } =>
            "account record serialization failed: {message}",
    }
}

/// Port for connected-account storage.
///
/// Records are namespaced per user. `delete` is idempotent: removing an id
/// that does not exist succeeds without error, matching the disconnect
/// semantics exposed to clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All connected accounts for a user, in stable key order.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConnectedAccount>, AccountRepositoryError>;

    /// Store a newly connected account.
    ///
    /// No uniqueness check is performed; the generated-id collision window
    /// is accepted for this workload.
    async fn insert(&self, account: &ConnectedAccount) -> Result<(), AccountRepositoryError>;

    /// Delete an account by id within the user's namespace. Idempotent.
    async fn delete(
        &self,
        user_id: &UserId,
        account_id: &AccountId,
    ) -> Result<(), AccountRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Listings are empty; inserts and deletes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRepository;

#[async_trait]
impl AccountRepository for FixtureAccountRepository {
    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<ConnectedAccount>, AccountRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _account: &ConnectedAccount) -> Result<(), AccountRepositoryError> {
        Ok(())
    }

    async fn delete(
        &self,
        _user_id: &UserId,
        _account_id: &AccountId,
    ) -> Result<(), AccountRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_lists_nothing_and_accepts_mutations() {
        let repo = FixtureAccountRepository;
        let user_id = UserId::random();

        let listed = repo
            .list_for_user(&user_id)
            .await
            .expect("fixture list succeeds");
        assert!(listed.is_empty());

        repo.delete(&user_id, &AccountId::new("1-abc").expect("id"))
            .await
            .expect("fixture delete succeeds");
    }
}
