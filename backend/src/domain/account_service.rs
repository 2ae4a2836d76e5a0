//! Connected-account registry domain service.
//!
//! Implements the [`AccountRegistryQuery`] and [`AccountRegistryCommand`]
//! driving ports, enforcing the per-plan account limit on connect.
//!
//! The limit check is read-then-write over the store with no coordination:
//! two concurrent connects for the same user can both pass the check. The
//! race is accepted for this workload.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AccountRegistryCommand, AccountRegistryQuery, AccountRepository, AccountRepositoryError,
    ProfileRepository,
};
use crate::domain::user_profile_service::map_profile_error;
use crate::domain::{AccountId, ConnectedAccount, Error, NewAccountDetails, PlanTier, UserId};

/// Account registry service implementing the driving ports.
#[derive(Clone)]
pub struct AccountRegistryService<P, A> {
    profiles: Arc<P>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<P, A> AccountRegistryService<P, A> {
    /// Create a new service with the given repositories and clock.
    pub fn new(profiles: Arc<P>, accounts: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            accounts,
            clock,
        }
    }
}

pub(crate) fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account store unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account store error: {message}"))
        }
        AccountRepositoryError::Serialization { message } => {
            Error::internal(format!("account record corrupt: {message}"))
        }
    }
}

impl<P, A> AccountRegistryService<P, A>
where
    P: ProfileRepository,
    A: AccountRepository,
{
    async fn plan_for(&self, user_id: &UserId) -> Result<PlanTier, Error> {
        // Missing profile records fall back to the free tier rather than
        // failing the request.
        let profile = self
            .profiles
            .find(user_id)
            .await
            .map_err(map_profile_error)?;
        Ok(profile.map(|record| record.plan()).unwrap_or_default())
    }
}

#[async_trait]
impl<P, A> AccountRegistryQuery for AccountRegistryService<P, A>
where
    P: ProfileRepository,
    A: AccountRepository,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<ConnectedAccount>, Error> {
        self.accounts
            .list_for_user(user_id)
            .await
            .map_err(map_account_error)
    }
}

#[async_trait]
impl<P, A> AccountRegistryCommand for AccountRegistryService<P, A>
where
    P: ProfileRepository,
    A: AccountRepository,
{
    async fn connect(
        &self,
        user_id: &UserId,
        details: NewAccountDetails,
    ) -> Result<ConnectedAccount, Error> {
        let plan = self.plan_for(user_id).await?;
        let current = self
            .accounts
            .list_for_user(user_id)
            .await
            .map_err(map_account_error)?
            .len();

        let limit = plan.account_limit();
        if current >= limit {
            return Err(
                Error::limit_exceeded(format!("Account limit reached for {plan} plan"))
                    .with_details(json!({ "limit": limit, "current": current })),
            );
        }

        let now = self.clock.utc();
        let account =
            ConnectedAccount::connect(AccountId::generate(now), user_id.clone(), details, now);
        self.accounts
            .insert(&account)
            .await
            .map_err(map_account_error)?;

        info!(user_id = %user_id, platform = %account.platform(), "social account connected");
        Ok(account)
    }

    async fn disconnect(&self, user_id: &UserId, account_id: &AccountId) -> Result<(), Error> {
        self.accounts
            .delete(user_id, account_id)
            .await
            .map_err(map_account_error)?;

        info!(user_id = %user_id, account_id = %account_id, "social account disconnected");
        Ok(())
    }
}
