//! Authentication primitives for bearer-token access.
//!
//! Tokens are opaque provider-issued secrets. They are held in zeroizing
//! storage and must never be logged raw; use [`AccessToken::fingerprint`]
//! for log correlation instead.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Number of hex characters retained from the token digest for logging.
const FINGERPRINT_LEN: usize = 12;

/// Domain error returned when a bearer token value is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessTokenValidationError {
    /// Token was missing or blank once trimmed.
    EmptyToken,
}

impl fmt::Display for AccessTokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "access token must not be empty"),
        }
    }
}

impl std::error::Error for AccessTokenValidationError {}

/// Opaque bearer token presented by a client.
///
/// ## Invariants
/// - The raw value is non-empty once trimmed.
///
/// Deliberately implements neither `Display` nor `Serialize`: the raw value
/// only leaves the process inside an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Construct a token from raw header input.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccessTokenValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AccessTokenValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Raw token value for outbound `Authorization` headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Short SHA-256 digest prefix safe to include in log lines.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_LEN);
        encoded
    }
}
