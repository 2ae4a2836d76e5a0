//! Driven port wrapping the hosted identity provider.
//!
//! Credential storage, token issuance, and token verification all live with
//! the provider; the service only creates users and resolves bearer tokens
//! to identities. Adapters own transport details and map provider failures
//! onto [`IdentityProviderError`].

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{AccessToken, EmailAddress, Error, SignupDetails, UserId, UserName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider refused the request (duplicate email, weak password).
        Rejected { message: String } =>
            "identity provider rejected the request: {message}",
        /// The bearer token is missing, malformed, or expired.
        InvalidToken { message: String } =>
            "access token rejected: {message}",
        /// The provider could not be reached.
        Transport { message: String } =>
            "identity provider transport failure: {message}",
        /// The provider answered with a payload that could not be decoded.
        Decode { message: String } =>
            "identity provider response could not be decoded: {message}",
    }
}

impl From<IdentityProviderError> for Error {
    fn from(value: IdentityProviderError) -> Self {
        match value {
            IdentityProviderError::Rejected { message } => Error::invalid_request(message),
            IdentityProviderError::InvalidToken { .. } => {
                Error::unauthorized("Invalid or expired token")
            }
            IdentityProviderError::Transport { message } => {
                Error::service_unavailable(format!("identity provider unavailable: {message}"))
            }
            IdentityProviderError::Decode { message } => {
                Error::internal(format!("identity provider error: {message}"))
            }
        }
    }
}

/// Identity attributes the provider holds for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderIdentity {
    /// Stable identifier issued by the provider.
    pub id: UserId,
    /// Email address the identity was registered with.
    pub email: EmailAddress,
    /// Display name from the provider's user metadata, when present.
    pub name: Option<UserName>,
}

/// Port for identity provider operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new user with the provider.
    ///
    /// The email is auto-confirmed provider-side; no verification mail is
    /// sent by this service.
    async fn create_user(
        &self,
        details: &SignupDetails,
    ) -> Result<ProviderIdentity, IdentityProviderError>;

    /// Resolve a bearer token to the identity it was issued for.
    async fn verify_token(
        &self,
        token: &AccessToken,
    ) -> Result<ProviderIdentity, IdentityProviderError>;
}

/// In-memory identity provider used in tests and when no provider is
/// configured.
///
/// Tokens are registered explicitly via
/// [`FixtureIdentityProvider::register_token`]; `create_user` mimics the
/// hosted provider's duplicate-email rejection.
#[derive(Debug, Default)]
pub struct FixtureIdentityProvider {
    tokens: Mutex<HashMap<String, ProviderIdentity>>,
    registered_emails: Mutex<Vec<String>>,
}

impl FixtureIdentityProvider {
    /// Create an empty fixture provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a bearer token with an identity for later verification.
    pub fn register_token(&self, token: &AccessToken, identity: ProviderIdentity) {
        lock_or_recover(&self.tokens).insert(token.expose().to_owned(), identity);
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn create_user(
        &self,
        details: &SignupDetails,
    ) -> Result<ProviderIdentity, IdentityProviderError> {
        let mut registered = lock_or_recover(&self.registered_emails);
        let email = details.email().as_ref().to_owned();
        if registered.iter().any(|existing| existing == &email) {
            return Err(IdentityProviderError::rejected(
                "A user with this email address has already been registered",
            ));
        }
        registered.push(email);

        Ok(ProviderIdentity {
            id: UserId::random(),
            email: details.email().clone(),
            name: Some(details.name().clone()),
        })
    }

    async fn verify_token(
        &self,
        token: &AccessToken,
    ) -> Result<ProviderIdentity, IdentityProviderError> {
        lock_or_recover(&self.tokens)
            .get(token.expose())
            .cloned()
            .ok_or_else(|| IdentityProviderError::invalid_token("unknown or expired token"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    fn details() -> SignupDetails {
        SignupDetails::try_from_parts("ada@example.com", "long-enough", "Ada")
            .expect("valid signup details")
    }

    #[tokio::test]
    async fn fixture_rejects_duplicate_emails() {
        let provider = FixtureIdentityProvider::new();
        provider
            .create_user(&details())
            .await
            .expect("first signup succeeds");
        let err = provider
            .create_user(&details())
            .await
            .expect_err("duplicate signup fails");
        assert!(matches!(err, IdentityProviderError::Rejected { .. }));
    }

    #[tokio::test]
    async fn fixture_verifies_registered_tokens() {
        let provider = FixtureIdentityProvider::new();
        let identity = provider
            .create_user(&details())
            .await
            .expect("signup succeeds");
        let token = AccessToken::new("fixture-token").expect("token");
        provider.register_token(&token, identity.clone());

        let verified = provider
            .verify_token(&token)
            .await
            .expect("registered token verifies");
        assert_eq!(verified, identity);

        let unknown = AccessToken::new("other-token").expect("token");
        let err = provider
            .verify_token(&unknown)
            .await
            .expect_err("unknown token fails");
        assert!(matches!(err, IdentityProviderError::InvalidToken { .. }));
    }

    #[rstest]
    #[case(IdentityProviderError::rejected("taken"), ErrorCode::InvalidRequest)]
    #[case(IdentityProviderError::invalid_token("expired"), ErrorCode::Unauthorized)]
    #[case(IdentityProviderError::transport("refused"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityProviderError::decode("bad json"), ErrorCode::InternalError)]
    fn maps_onto_domain_error_codes(
        #[case] error: IdentityProviderError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(error).code(), expected);
    }
}
