//! Driving port for the signup use-case.
//!
//! Inbound adapters call this to create accounts without knowing which
//! identity provider or store backs the operation, keeping handler tests
//! deterministic.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, PlanTier, SignupDetails, UserId, UserProfile};

/// Domain use-case port for signup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupCommand: Send + Sync {
    /// Register a user with the identity provider and persist their profile.
    async fn signup(&self, details: SignupDetails) -> Result<UserProfile, Error>;
}

/// Fixture signup that fabricates a free-tier profile without side effects.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSignupCommand;

#[async_trait]
impl SignupCommand for FixtureSignupCommand {
    async fn signup(&self, details: SignupDetails) -> Result<UserProfile, Error> {
        Ok(UserProfile::new(
            UserId::random(),
            details.email().clone(),
            details.name().clone(),
            PlanTier::Free,
            Utc::now(),
        ))
    }
}
