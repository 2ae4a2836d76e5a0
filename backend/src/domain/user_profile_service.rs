//! Signup and authenticated-user domain service.
//!
//! Implements the [`SignupCommand`] and [`UserProfileQuery`] driving ports
//! over the identity provider and profile repository driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    IdentityProvider, ProfileRepository, ProfileRepositoryError, ProviderIdentity, SignupCommand,
    UserProfileQuery,
};
use crate::domain::{AuthenticatedUser, Error, PlanTier, SignupDetails, UserProfile};

/// User profile service implementing the signup and lookup ports.
#[derive(Clone)]
pub struct UserProfileService<P> {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> UserProfileService<P> {
    /// Create a new service with the given provider, repository, and clock.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<P>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity,
            profiles,
            clock,
        }
    }
}

pub(crate) fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
        ProfileRepositoryError::Serialization { message } => {
            Error::internal(format!("profile record corrupt: {message}"))
        }
    }
}

#[async_trait]
impl<P> SignupCommand for UserProfileService<P>
where
    P: ProfileRepository,
{
    async fn signup(&self, details: SignupDetails) -> Result<UserProfile, Error> {
        let identity = self.identity.create_user(&details).await?;

        let profile = UserProfile::new(
            identity.id,
            details.email().clone(),
            details.name().clone(),
            PlanTier::Free,
            self.clock.utc(),
        );
        self.profiles
            .save(&profile)
            .await
            .map_err(map_profile_error)?;

        info!(user_id = %profile.id(), "user signup successful");
        Ok(profile)
    }
}

#[async_trait]
impl<P> UserProfileQuery for UserProfileService<P>
where
    P: ProfileRepository,
{
    async fn current_user(&self, identity: &ProviderIdentity) -> Result<AuthenticatedUser, Error> {
        let profile = self
            .profiles
            .find(&identity.id)
            .await
            .map_err(map_profile_error)?;
        Ok(AuthenticatedUser::from_parts(identity, profile.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        IdentityProviderError, MockIdentityProvider, MockProfileRepository,
    };
    use crate::domain::{EmailAddress, UserId, UserName};

    fn details() -> SignupDetails {
        SignupDetails::try_from_parts("ada@example.com", "long-enough", "Ada")
            .expect("valid details")
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(
            Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
                .single()
                .expect("fixture timestamp"),
        );
        Arc::new(clock)
    }

    #[tokio::test]
    async fn signup_persists_free_profile_with_clock_timestamp() {
        let caller = UserId::random();
        let caller_for_mock = caller.clone();
        let mut identity = MockIdentityProvider::new();
        identity.expect_create_user().times(1).return_once(move |signup| {
            Ok(ProviderIdentity {
                id: caller_for_mock,
                email: signup.email().clone(),
                name: Some(signup.name().clone()),
            })
        });

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_save()
            .withf(move |profile: &UserProfile| {
                profile.id() == &caller && profile.plan() == PlanTier::Free
            })
            .times(1)
            .return_once(|_| Ok(()));

        let service = UserProfileService::new(Arc::new(identity), Arc::new(profiles), fixed_clock());
        let profile = service.signup(details()).await.expect("signup succeeds");
        assert_eq!(profile.plan(), PlanTier::Free);
        assert_eq!(
            profile.created_at(),
            Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
                .single()
                .expect("fixture timestamp")
        );
    }

    #[tokio::test]
    async fn signup_propagates_provider_rejection_without_saving() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_create_user()
            .times(1)
            .return_once(|_| Err(IdentityProviderError::rejected("email taken")));

        let mut profiles = MockProfileRepository::new();
        profiles.expect_save().times(0);

        let service = UserProfileService::new(Arc::new(identity), Arc::new(profiles), fixed_clock());
        let error = service.signup(details()).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message, "email taken");
    }

    #[tokio::test]
    async fn signup_surfaces_store_outage_as_service_unavailable() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_create_user().times(1).return_once(|signup| {
            Ok(ProviderIdentity {
                id: UserId::random(),
                email: signup.email().clone(),
                name: None,
            })
        });

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_save()
            .times(1)
            .return_once(|_| Err(ProfileRepositoryError::connection("refused")));

        let service = UserProfileService::new(Arc::new(identity), Arc::new(profiles), fixed_clock());
        let error = service.signup(details()).await.expect_err("store down");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn current_user_merges_profile_plan() {
        let caller = UserId::random();
        let profile = UserProfile::new(
            caller.clone(),
            EmailAddress::new("ada@example.com").expect("email"),
            UserName::new("Ada").expect("name"),
            PlanTier::Pro,
            Utc::now(),
        );

        let mut profiles = MockProfileRepository::new();
        let stored = profile.clone();
        profiles
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(stored)));

        let service = UserProfileService::new(
            Arc::new(MockIdentityProvider::new()),
            Arc::new(profiles),
            fixed_clock(),
        );
        let identity = ProviderIdentity {
            id: caller,
            email: EmailAddress::new("ada@example.com").expect("email"),
            name: None,
        };
        let user = service
            .current_user(&identity)
            .await
            .expect("lookup succeeds");
        assert_eq!(user.plan, PlanTier::Pro);
        assert_eq!(user.name.as_ref().map(AsRef::as_ref), Some("Ada"));
    }
}
