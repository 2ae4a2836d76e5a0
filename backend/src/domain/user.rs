//! User identity and profile data model.
//!
//! The identity provider owns credentials; this module models the identifier
//! and profile record the service stores alongside it. Constructors validate
//! string inputs so adapters cannot smuggle malformed values into the domain.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::PlanTier;
use crate::domain::ports::ProviderIdentity;

/// Validation errors returned by the user-domain constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier was not a valid UUID.
    InvalidId,
    /// The email address was empty once trimmed.
    EmptyEmail,
    /// The email address did not match the expected shape.
    InvalidEmail,
    /// The display name was empty once trimmed.
    EmptyName,
    /// The display name exceeded the maximum length.
    NameTooLong {
        /// Maximum number of characters allowed.
        max: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the identity provider, stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is the identity provider's problem.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(normalized) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 120;

/// Human readable name attached to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if normalized.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: USER_NAME_MAX });
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Profile record persisted for every signed-up user.
///
/// ## Invariants
/// - `id` is a valid UUID string issued by the identity provider.
/// - `plan` defaults to [`PlanTier::Free`] at signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserProfileDto", into = "UserProfileDto")]
pub struct UserProfile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
    #[schema(value_type = String, example = "Ada Lovelace")]
    name: UserName,
    plan: PlanTier,
    created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build a new [`UserProfile`] from validated components.
    #[must_use]
    pub fn new(
        id: UserId,
        email: EmailAddress,
        name: UserName,
        plan: PlanTier,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            plan,
            created_at,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email address registered with the identity provider.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name given at signup.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Subscription tier.
    #[must_use]
    pub fn plan(&self) -> PlanTier {
        self.plan
    }

    /// Timestamp the profile record was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileDto {
    id: String,
    email: String,
    name: String,
    plan: PlanTier,
    created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserProfileDto {
    fn from(value: UserProfile) -> Self {
        let UserProfile {
            id,
            email,
            name,
            plan,
            created_at,
        } = value;
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            plan,
            created_at,
        }
    }
}

impl TryFrom<UserProfileDto> for UserProfile {
    type Error = UserValidationError;

    fn try_from(value: UserProfileDto) -> Result<Self, Self::Error> {
        let UserProfileDto {
            id,
            email,
            name,
            plan,
            created_at,
        } = value;
        Ok(UserProfile::new(
            UserId::new(id)?,
            EmailAddress::new(email)?,
            UserName::new(name)?,
            plan,
            created_at,
        ))
    }
}

/// Identity returned to clients after a bearer-token lookup.
///
/// Merges the provider identity with the stored profile: the display name
/// prefers the provider's metadata and falls back to the profile; the plan
/// falls back to [`PlanTier::Free`] when no profile record exists yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Email address registered with the identity provider.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: EmailAddress,
    /// Display name, when either the provider or the profile carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    pub name: Option<UserName>,
    /// Subscription tier; `free` when no profile record exists.
    pub plan: PlanTier,
}

impl AuthenticatedUser {
    /// Merge a provider identity with the optional stored profile.
    #[must_use]
    pub fn from_parts(identity: &ProviderIdentity, profile: Option<&UserProfile>) -> Self {
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: identity
                .name
                .clone()
                .or_else(|| profile.map(|record| record.name().clone())),
            plan: profile.map(UserProfile::plan).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests;
