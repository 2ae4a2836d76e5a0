//! Plan tiers gating connected-account counts and feed refresh cadence.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subscription tier attached to a user profile.
///
/// New users start on [`PlanTier::Free`]; upgrades happen out of band (the
/// billing flow writes the profile record directly).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// One connected account, weekly feed refresh.
    #[default]
    Free,
    /// Five connected accounts, daily feed refresh.
    Pro,
    /// Effectively unbounded accounts, hourly feed refresh.
    Ultra,
}

impl PlanTier {
    /// Maximum number of connected accounts this tier allows.
    ///
    /// Ultra is capped at 999, which is treated as unbounded by the product.
    #[must_use]
    pub const fn account_limit(self) -> usize {
        match self {
            Self::Free => 1,
            Self::Pro => 5,
            Self::Ultra => 999,
        }
    }

    /// Feed refresh cadence advertised for this tier.
    #[must_use]
    pub const fn refresh_rate(self) -> RefreshRate {
        match self {
            Self::Free => RefreshRate::Weekly,
            Self::Pro => RefreshRate::Daily,
            Self::Ultra => RefreshRate::Hourly,
        }
    }

    /// Lowercase tier name as serialized on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Ultra => "ultra",
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a published feed is refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RefreshRate {
    /// Refreshed once a week.
    Weekly,
    /// Refreshed once a day.
    Daily,
    /// Refreshed once an hour.
    Hourly,
}

impl RefreshRate {
    /// Lowercase cadence name as serialized on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Daily => "daily",
            Self::Hourly => "hourly",
        }
    }
}

impl std::fmt::Display for RefreshRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
