//! Domain primitives, aggregates, ports, and services.
//!
//! Types are immutable with validated constructors; serialization contracts
//! (serde) are documented on each type. Ports live in [`ports`], services
//! implementing the driving ports are re-exported at this level.

pub mod account;
pub mod auth;
pub mod error;
pub mod feed;
pub mod plan;
pub mod ports;
pub mod signup;
pub mod trace_id;
pub mod user;

mod account_service;
mod feed_service;
mod user_profile_service;

pub use self::account::{
    AccountId, AccountValidationError, ConnectedAccount, NewAccountDetails, Platform,
};
pub use self::account_service::AccountRegistryService;
pub use self::auth::{AccessToken, AccessTokenValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::feed::{
    FeedMeta, SesFeed, SocialFeedEntry, StoredFeed, FEED_CONTEXT, FEED_ENTITY_TYPE, FEED_VERSION,
};
pub use self::feed_service::FeedAssemblyService;
pub use self::plan::{PlanTier, RefreshRate};
pub use self::signup::{Password, SignupDetails, SignupValidationError, PASSWORD_MIN};
pub use self::trace_id::{TraceId, TRACE_ID_HEADER};
pub use self::user::{
    AuthenticatedUser, EmailAddress, UserId, UserName, UserProfile, UserValidationError,
};
pub use self::user_profile_service::UserProfileService;

/// Convenient result alias for operations returning a domain [`Error`].
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn denied() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// assert!(denied().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
