//! Driving port for the authenticated-user lookup use-case.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error};

use super::ProviderIdentity;

/// Domain use-case port resolving a verified identity to the merged user view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Merge the provider identity with the stored profile record.
    async fn current_user(&self, identity: &ProviderIdentity) -> Result<AuthenticatedUser, Error>;
}

/// Fixture lookup that merges against an absent profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn current_user(&self, identity: &ProviderIdentity) -> Result<AuthenticatedUser, Error> {
        Ok(AuthenticatedUser::from_parts(identity, None))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{EmailAddress, PlanTier, UserId};

    #[tokio::test]
    async fn fixture_lookup_defaults_plan_to_free() {
        let identity = ProviderIdentity {
            id: UserId::random(),
            email: EmailAddress::new("ada@example.com").expect("email"),
            name: None,
        };
        let user = FixtureUserProfileQuery
            .current_user(&identity)
            .await
            .expect("fixture lookup succeeds");
        assert_eq!(user.plan, PlanTier::Free);
    }
}
