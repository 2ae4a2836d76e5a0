//! Driving port for feed generation.

use async_trait::async_trait;

use crate::domain::{Error, SesFeed};

use super::ProviderIdentity;

/// Message returned when feed generation is attempted with no accounts.
pub const NO_ACCOUNTS_MESSAGE: &str =
    "No connected accounts. Please connect at least one social media account.";

/// Domain use-case port assembling and storing the SES feed document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedCommand: Send + Sync {
    /// Assemble the feed from the account registry and overwrite the stored
    /// copy. Requires at least one connected account.
    async fn generate(&self, identity: &ProviderIdentity) -> Result<SesFeed, Error>;
}

/// Fixture generation mirroring an empty account registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedCommand;

#[async_trait]
impl FeedCommand for FixtureFeedCommand {
    async fn generate(&self, _identity: &ProviderIdentity) -> Result<SesFeed, Error> {
        Err(Error::invalid_request(NO_ACCOUNTS_MESSAGE))
    }
}
