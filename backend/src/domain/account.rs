//! Connected social-account data model.
//!
//! One record per social profile a user has linked to their feed. Records
//! are keyed under the owning user in the store, so account identifiers are
//! constrained to characters that are safe inside a key segment.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;

/// Maximum allowed length for a platform name.
pub const PLATFORM_MAX: usize = 64;

/// Number of random base36 characters appended to generated account ids.
const ACCOUNT_ID_SUFFIX_LEN: usize = 9;

/// Validation errors returned by the account-domain constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Platform was missing or blank once trimmed.
    EmptyPlatform,
    /// Platform exceeded the maximum length.
    PlatformTooLong {
        /// Maximum number of characters allowed.
        max: usize,
    },
    /// Account id was empty.
    EmptyAccountId,
    /// Account id contained characters unsafe for a key segment.
    AccountIdInvalidCharacters,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlatform => write!(f, "platform must not be empty"),
            Self::PlatformTooLong { max } => {
                write!(f, "platform must be at most {max} characters")
            }
            Self::EmptyAccountId => write!(f, "account id must not be empty"),
            Self::AccountIdInvalidCharacters => write!(
                f,
                "account id may only contain letters, numbers, or dashes",
            ),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Social platform a connected account belongs to (e.g. `instagram`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Platform(String);

impl Platform {
    /// Validate and construct a [`Platform`] from owned input.
    pub fn new(platform: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(platform.into())
    }

    fn from_owned(platform: String) -> Result<Self, AccountValidationError> {
        let normalized = platform.trim();
        if normalized.is_empty() {
            return Err(AccountValidationError::EmptyPlatform);
        }
        if normalized.chars().count() > PLATFORM_MAX {
            return Err(AccountValidationError::PlatformTooLong { max: PLATFORM_MAX });
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.0
    }
}

impl TryFrom<String> for Platform {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Connected-account identifier, unique per user in practice.
///
/// Generated as `{unix_millis}-{random base36 suffix}`. The scheme is not
/// collision-proof under concurrent writes; the window is accepted for this
/// workload and documented rather than papered over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validate and construct an [`AccountId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh identifier for the given instant.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(Alphanumeric)
            .take(ACCOUNT_ID_SUFFIX_LEN)
            .map(|byte| (byte as char).to_ascii_lowercase())
            .collect();
        Self(format!("{}-{suffix}", now.timestamp_millis()))
    }

    fn from_owned(id: String) -> Result<Self, AccountValidationError> {
        if id.is_empty() {
            return Err(AccountValidationError::EmptyAccountId);
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AccountValidationError::AccountIdInvalidCharacters);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validated payload for connecting a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountDetails {
    platform: Platform,
    handle: String,
    profile_url: String,
}

impl NewAccountDetails {
    /// Construct connection details from raw request fields.
    ///
    /// `handle` and `profile_url` are optional on the wire and default to
    /// empty strings, matching the published feed format.
    pub fn try_from_parts(
        platform: &str,
        handle: Option<String>,
        profile_url: Option<String>,
    ) -> Result<Self, AccountValidationError> {
        Ok(Self {
            platform: Platform::new(platform)?,
            handle: handle.unwrap_or_default(),
            profile_url: profile_url.unwrap_or_default(),
        })
    }

    /// Social platform being connected.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }
}

/// Social account linked to a user's feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ConnectedAccountDto", into = "ConnectedAccountDto")]
pub struct ConnectedAccount {
    #[schema(value_type = String, example = "1736931000000-k3j9x2m4q")]
    id: AccountId,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user_id: UserId,
    #[schema(value_type = String, example = "instagram")]
    platform: Platform,
    #[schema(example = "@ada")]
    handle: String,
    #[schema(example = "https://instagram.com/ada")]
    profile_url: String,
    connected_at: DateTime<Utc>,
    last_sync: DateTime<Utc>,
}

impl ConnectedAccount {
    /// Build a freshly connected account record.
    ///
    /// `connected_at` and `last_sync` both start at the connection instant.
    #[must_use]
    pub fn connect(id: AccountId, user_id: UserId, details: NewAccountDetails, now: DateTime<Utc>) -> Self {
        let NewAccountDetails {
            platform,
            handle,
            profile_url,
        } = details;
        Self {
            id,
            user_id,
            platform,
            handle,
            profile_url,
            connected_at: now,
            last_sync: now,
        }
    }

    /// Account identifier.
    #[must_use]
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Owning user.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Social platform.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Handle on the platform; may be empty.
    #[must_use]
    pub fn handle(&self) -> &str {
        self.handle.as_str()
    }

    /// Public profile URL; may be empty.
    #[must_use]
    pub fn profile_url(&self) -> &str {
        self.profile_url.as_str()
    }

    /// Timestamp the account was connected.
    #[must_use]
    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Timestamp of the most recent content sync.
    #[must_use]
    pub fn last_sync(&self) -> DateTime<Utc> {
        self.last_sync
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectedAccountDto {
    id: String,
    user_id: String,
    platform: String,
    #[serde(default)]
    handle: String,
    #[serde(default)]
    profile_url: String,
    connected_at: DateTime<Utc>,
    last_sync: DateTime<Utc>,
}

impl From<ConnectedAccount> for ConnectedAccountDto {
    fn from(value: ConnectedAccount) -> Self {
        let ConnectedAccount {
            id,
            user_id,
            platform,
            handle,
            profile_url,
            connected_at,
            last_sync,
        } = value;
        Self {
            id: id.into(),
            user_id: user_id.into(),
            platform: platform.into(),
            handle,
            profile_url,
            connected_at,
            last_sync,
        }
    }
}

/// Wire-decoding failures for connected accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectedAccountDecodeError {
    /// Account-level field failed validation.
    Account(AccountValidationError),
    /// Owning user id failed validation.
    UserId(crate::domain::UserValidationError),
}

impl fmt::Display for ConnectedAccountDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(inner) => inner.fmt(f),
            Self::UserId(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for ConnectedAccountDecodeError {}

impl TryFrom<ConnectedAccountDto> for ConnectedAccount {
    type Error = ConnectedAccountDecodeError;

    fn try_from(value: ConnectedAccountDto) -> Result<Self, Self::Error> {
        let ConnectedAccountDto {
            id,
            user_id,
            platform,
            handle,
            profile_url,
            connected_at,
            last_sync,
        } = value;
        Ok(Self {
            id: AccountId::new(id).map_err(ConnectedAccountDecodeError::Account)?,
            user_id: UserId::new(user_id).map_err(ConnectedAccountDecodeError::UserId)?,
            platform: Platform::new(platform).map_err(ConnectedAccountDecodeError::Account)?,
            handle,
            profile_url,
            connected_at,
            last_sync,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    fn fixture_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
            .single()
            .expect("fixture timestamp")
    }

    #[test]
    fn generated_ids_embed_millis_and_base36_suffix() {
        let now = fixture_instant();
        let id = AccountId::generate(now);
        let (millis, suffix) = id
            .as_ref()
            .split_once('-')
            .expect("generated id has a dash separator");
        assert_eq!(millis, now.timestamp_millis().to_string());
        assert_eq!(suffix.chars().count(), 9);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn generated_ids_survive_validation() {
        let id = AccountId::generate(fixture_instant());
        assert!(AccountId::new(id.as_ref()).is_ok());
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyAccountId)]
    #[case("has:colon", AccountValidationError::AccountIdInvalidCharacters)]
    #[case("has space", AccountValidationError::AccountIdInvalidCharacters)]
    fn rejects_key_unsafe_ids(#[case] raw: &str, #[case] expected: AccountValidationError) {
        let err = AccountId::new(raw).expect_err("invalid id must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyPlatform)]
    #[case("   ", AccountValidationError::EmptyPlatform)]
    fn rejects_blank_platforms(#[case] raw: &str, #[case] expected: AccountValidationError) {
        let err = Platform::new(raw).expect_err("blank platform must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn connect_defaults_optional_fields_to_empty() {
        let details = NewAccountDetails::try_from_parts("instagram", None, None)
            .expect("valid details");
        let account = ConnectedAccount::connect(
            AccountId::new("1736931000000-k3j9x2m4q").expect("id"),
            UserId::random(),
            details,
            fixture_instant(),
        );
        assert_eq!(account.handle(), "");
        assert_eq!(account.profile_url(), "");
        assert_eq!(account.connected_at(), account.last_sync());
    }

    #[test]
    fn serializes_camel_case_and_round_trips() {
        let details = NewAccountDetails::try_from_parts(
            "instagram",
            Some("@ada".to_owned()),
            Some("https://instagram.com/ada".to_owned()),
        )
        .expect("valid details");
        let account = ConnectedAccount::connect(
            AccountId::new("1736931000000-k3j9x2m4q").expect("id"),
            UserId::random(),
            details,
            fixture_instant(),
        );

        let value = serde_json::to_value(&account).expect("account serializes");
        assert!(value.get("userId").is_some());
        assert!(value.get("profileUrl").is_some());
        assert!(value.get("connectedAt").is_some());
        assert!(value.get("lastSync").is_some());
        assert_eq!(
            value.get("platform").and_then(Value::as_str),
            Some("instagram")
        );

        let decoded: ConnectedAccount =
            serde_json::from_value(value).expect("account deserializes");
        assert_eq!(decoded, account);
    }
}
