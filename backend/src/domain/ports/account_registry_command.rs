//! Driving port for connecting and disconnecting accounts.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{AccountId, ConnectedAccount, Error, NewAccountDetails, UserId};

/// Domain use-case port for account registry mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistryCommand: Send + Sync {
    /// Connect a new account, enforcing the caller's plan limit.
    ///
    /// Fails with [`crate::domain::ErrorCode::LimitExceeded`] carrying
    /// `{ limit, current }` details once the plan's maximum is reached.
    async fn connect(
        &self,
        user_id: &UserId,
        details: NewAccountDetails,
    ) -> Result<ConnectedAccount, Error>;

    /// Disconnect an account by id. Idempotent: unknown ids succeed.
    async fn disconnect(&self, user_id: &UserId, account_id: &AccountId) -> Result<(), Error>;
}

/// Fixture registry command that connects without limit checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRegistryCommand;

#[async_trait]
impl AccountRegistryCommand for FixtureAccountRegistryCommand {
    async fn connect(
        &self,
        user_id: &UserId,
        details: NewAccountDetails,
    ) -> Result<ConnectedAccount, Error> {
        let now = Utc::now();
        Ok(ConnectedAccount::connect(
            AccountId::generate(now),
            user_id.clone(),
            details,
            now,
        ))
    }

    async fn disconnect(&self, _user_id: &UserId, _account_id: &AccountId) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_connect_echoes_platform() {
        let details = NewAccountDetails::try_from_parts("instagram", None, None)
            .expect("valid details");
        let account = FixtureAccountRegistryCommand
            .connect(&UserId::random(), details)
            .await
            .expect("fixture connect succeeds");
        assert_eq!(account.platform().as_ref(), "instagram");
    }
}
