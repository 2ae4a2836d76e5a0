//! Feed assembly domain service.
//!
//! Implements the [`FeedCommand`] and [`FeedQuery`] driving ports: a single
//! pass over the account registry produces the SES document, which replaces
//! the stored copy wholesale. No diffing, history, or signatures.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use url::Url;

use crate::domain::ports::{
    AccountRepository, FeedCommand, FeedQuery, FeedRepository, FeedRepositoryError,
    ProfileRepository, ProviderIdentity, NO_ACCOUNTS_MESSAGE, NO_FEED_MESSAGE,
};
use crate::domain::account_service::map_account_error;
use crate::domain::user_profile_service::map_profile_error;
use crate::domain::{
    AccountId, ConnectedAccount, Error, FeedMeta, SesFeed, SocialFeedEntry, StoredFeed, UserId,
    FEED_CONTEXT, FEED_ENTITY_TYPE, FEED_VERSION,
};

/// Feed assembly service implementing the driving ports.
#[derive(Clone)]
pub struct FeedAssemblyService<P, A, F> {
    profiles: Arc<P>,
    accounts: Arc<A>,
    feeds: Arc<F>,
    clock: Arc<dyn Clock>,
    base_url: Url,
}

impl<P, A, F> FeedAssemblyService<P, A, F> {
    /// Create a new service.
    ///
    /// `base_url` is the public origin feed URLs are synthesized under.
    pub fn new(
        profiles: Arc<P>,
        accounts: Arc<A>,
        feeds: Arc<F>,
        clock: Arc<dyn Clock>,
        base_url: Url,
    ) -> Self {
        Self {
            profiles,
            accounts,
            feeds,
            clock,
            base_url,
        }
    }

    fn feed_url(&self, user_id: &UserId, account_id: &AccountId) -> String {
        format!(
            "{}/feeds/{user_id}/{account_id}",
            self.base_url.as_str().trim_end_matches('/'),
        )
    }

    fn entry_for(&self, user_id: &UserId, account: &ConnectedAccount) -> SocialFeedEntry {
        SocialFeedEntry {
            platform: account.platform().as_ref().to_owned(),
            handle: account.handle().to_owned(),
            profile_url: account.profile_url().to_owned(),
            last_updated: account.last_sync(),
            feed_url: self.feed_url(user_id, account.id()),
        }
    }
}

fn map_feed_error(error: FeedRepositoryError) -> Error {
    match error {
        FeedRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feed store unavailable: {message}"))
        }
        FeedRepositoryError::Query { message } => {
            Error::internal(format!("feed store error: {message}"))
        }
        FeedRepositoryError::Serialization { message } => {
            Error::internal(format!("feed record corrupt: {message}"))
        }
    }
}

#[async_trait]
impl<P, A, F> FeedCommand for FeedAssemblyService<P, A, F>
where
    P: ProfileRepository,
    A: AccountRepository,
    F: FeedRepository,
{
    async fn generate(&self, identity: &ProviderIdentity) -> Result<SesFeed, Error> {
        let accounts = self
            .accounts
            .list_for_user(&identity.id)
            .await
            .map_err(map_account_error)?;
        if accounts.is_empty() {
            return Err(Error::invalid_request(NO_ACCOUNTS_MESSAGE));
        }

        let profile = self
            .profiles
            .find(&identity.id)
            .await
            .map_err(map_profile_error)?;
        let plan = profile
            .as_ref()
            .map(|record| record.plan())
            .unwrap_or_default();
        let name = profile
            .as_ref()
            .map(|record| record.name().as_ref().to_owned())
            .unwrap_or_else(|| identity.email.as_ref().to_owned());

        let generated = self.clock.utc();
        let social_feeds = accounts
            .iter()
            .map(|account| self.entry_for(&identity.id, account))
            .collect();

        let feed = SesFeed {
            context: FEED_CONTEXT.to_owned(),
            entity_type: FEED_ENTITY_TYPE.to_owned(),
            name,
            email: identity.email.as_ref().to_owned(),
            social_feeds,
            meta: FeedMeta {
                generated,
                version: FEED_VERSION.to_owned(),
                refresh_rate: plan.refresh_rate(),
                plan,
            },
        };

        let stored = StoredFeed {
            feed: feed.clone(),
            generated_at: generated,
        };
        self.feeds
            .save(&identity.id, &stored)
            .await
            .map_err(map_feed_error)?;

        info!(user_id = %identity.id, plan = %plan, "feed generated");
        Ok(feed)
    }
}

#[async_trait]
impl<P, A, F> FeedQuery for FeedAssemblyService<P, A, F>
where
    P: ProfileRepository,
    A: AccountRepository,
    F: FeedRepository,
{
    async fn fetch(&self, user_id: &UserId) -> Result<StoredFeed, Error> {
        self.feeds
            .find(user_id)
            .await
            .map_err(map_feed_error)?
            .ok_or_else(|| Error::not_found(NO_FEED_MESSAGE))
    }
}
