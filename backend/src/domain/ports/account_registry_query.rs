//! Driving port for listing connected accounts.

use async_trait::async_trait;

use crate::domain::{ConnectedAccount, Error, UserId};

/// Domain use-case port for account listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistryQuery: Send + Sync {
    /// All accounts connected by the given user.
    async fn list(&self, user_id: &UserId) -> Result<Vec<ConnectedAccount>, Error>;
}

/// Fixture registry query with no connected accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRegistryQuery;

#[async_trait]
impl AccountRegistryQuery for FixtureAccountRegistryQuery {
    async fn list(&self, _user_id: &UserId) -> Result<Vec<ConnectedAccount>, Error> {
        Ok(Vec::new())
    }
}
