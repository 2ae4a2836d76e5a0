//! Port wiring: build handler state from the server configuration.
//!
//! Configured adapters are used when present; otherwise in-process
//! fixtures keep the server bootable with a warning.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use backend::domain::ports::{FixtureIdentityProvider, IdentityProvider};
use backend::domain::{AccountRegistryService, FeedAssemblyService, UserProfileService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    InMemoryKvStore, KvAccountRepository, KvFeedRepository, KvProfileRepository, KvStore,
};

use super::ServerConfig;

pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let identity: Arc<dyn IdentityProvider> = config.identity.clone().unwrap_or_else(|| {
        warn!("no identity provider configured; using in-memory fixture (dev only)");
        Arc::new(FixtureIdentityProvider::new())
    });
    let kv: Arc<dyn KvStore> = config.kv.clone().unwrap_or_else(|| {
        warn!("no redis url configured; records are kept in memory (dev only)");
        Arc::new(InMemoryKvStore::new())
    });

    let profiles = Arc::new(KvProfileRepository::new(kv.clone()));
    let accounts = Arc::new(KvAccountRepository::new(kv.clone()));
    let feeds = Arc::new(KvFeedRepository::new(kv));
    let clock = Arc::new(DefaultClock);

    let users = Arc::new(UserProfileService::new(
        identity.clone(),
        profiles.clone(),
        clock.clone(),
    ));
    let registry = Arc::new(AccountRegistryService::new(
        profiles.clone(),
        accounts.clone(),
        clock.clone(),
    ));
    let feed = Arc::new(FeedAssemblyService::new(
        profiles,
        accounts,
        feeds,
        clock,
        config.feed_base_url.clone(),
    ));

    web::Data::new(HttpState {
        identity,
        signup: users.clone(),
        profile: users,
        accounts: registry.clone(),
        accounts_command: registry,
        feed: feed.clone(),
        feed_query: feed,
    })
}
