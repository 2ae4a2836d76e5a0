//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_registry_command;
mod account_registry_query;
mod account_repository;
mod feed_command;
mod feed_query;
mod feed_repository;
mod identity_provider;
mod profile_repository;
mod signup_command;
mod user_profile_query;

#[cfg(test)]
pub use account_registry_command::MockAccountRegistryCommand;
pub use account_registry_command::{AccountRegistryCommand, FixtureAccountRegistryCommand};
#[cfg(test)]
pub use account_registry_query::MockAccountRegistryQuery;
pub use account_registry_query::{AccountRegistryQuery, FixtureAccountRegistryQuery};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError, FixtureAccountRepository};
#[cfg(test)]
pub use feed_command::MockFeedCommand;
pub use feed_command::{FeedCommand, FixtureFeedCommand, NO_ACCOUNTS_MESSAGE};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::{FeedQuery, FixtureFeedQuery, NO_FEED_MESSAGE};
#[cfg(test)]
pub use feed_repository::MockFeedRepository;
pub use feed_repository::{FeedRepository, FeedRepositoryError, FixtureFeedRepository};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FixtureIdentityProvider, IdentityProvider, IdentityProviderError, ProviderIdentity,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{FixtureProfileRepository, ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use signup_command::MockSignupCommand;
pub use signup_command::{FixtureSignupCommand, SignupCommand};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
