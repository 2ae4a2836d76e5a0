//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountRegistryCommand, AccountRegistryQuery, FeedCommand, FeedQuery, FixtureAccountRegistryCommand,
    FixtureAccountRegistryQuery, FixtureFeedCommand, FixtureFeedQuery, FixtureIdentityProvider,
    FixtureSignupCommand, FixtureUserProfileQuery, IdentityProvider, SignupCommand,
    UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Identity provider used for token verification.
    pub identity: Arc<dyn IdentityProvider>,
    /// Signup use-case.
    pub signup: Arc<dyn SignupCommand>,
    /// Authenticated-user lookup use-case.
    pub profile: Arc<dyn UserProfileQuery>,
    /// Account listing use-case.
    pub accounts: Arc<dyn AccountRegistryQuery>,
    /// Account connect/disconnect use-case.
    pub accounts_command: Arc<dyn AccountRegistryCommand>,
    /// Feed generation use-case.
    pub feed: Arc<dyn FeedCommand>,
    /// Stored feed read use-case.
    pub feed_query: Arc<dyn FeedQuery>,
}

impl HttpState {
    /// State wired entirely from fixture ports.
    ///
    /// Useful for handler tests and doc examples that do not exercise
    /// business behaviour.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _identity = state.identity.clone();
    /// ```
    #[must_use]
    pub fn fixtures() -> Self {
        Self {
            identity: Arc::new(FixtureIdentityProvider::new()),
            signup: Arc::new(FixtureSignupCommand),
            profile: Arc::new(FixtureUserProfileQuery),
            accounts: Arc::new(FixtureAccountRegistryQuery),
            accounts_command: Arc::new(FixtureAccountRegistryCommand),
            feed: Arc::new(FixtureFeedCommand),
            feed_query: Arc::new(FixtureFeedQuery),
        }
    }
}
