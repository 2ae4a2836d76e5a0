//! SES feed document model.
//!
//! The feed is a schema.org-flavoured JSON document describing a user's
//! social presence for crawler and LLM consumption. It is assembled wholesale
//! from the account registry on every generation; no history is kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PlanTier, RefreshRate};

/// JSON-LD context embedded in every feed document.
pub const FEED_CONTEXT: &str = "https://schema.org";

/// JSON-LD entity type embedded in every feed document.
pub const FEED_ENTITY_TYPE: &str = "Person";

/// Feed document format version.
pub const FEED_VERSION: &str = "1.0";

/// One connected account as published in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialFeedEntry {
    /// Social platform name.
    #[schema(example = "instagram")]
    pub platform: String,
    /// Handle on the platform; may be empty.
    #[schema(example = "@ada")]
    pub handle: String,
    /// Public profile URL; may be empty.
    #[schema(example = "https://instagram.com/ada")]
    pub profile_url: String,
    /// Timestamp of the most recent content sync for this account.
    pub last_updated: DateTime<Utc>,
    /// Crawler-facing URL for this account's published feed.
    #[schema(example = "https://api.sesfeed.com/feeds/3fa85f64/1736931000000-k3j9x2m4q")]
    pub feed_url: String,
}

/// Metadata block describing the feed document itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedMeta {
    /// Instant the document was assembled.
    pub generated: DateTime<Utc>,
    /// Document format version.
    #[schema(example = "1.0")]
    pub version: String,
    /// Advertised refresh cadence derived from the owner's plan.
    pub refresh_rate: RefreshRate,
    /// Owner's plan tier at generation time.
    pub plan: PlanTier,
}

/// Published SES feed document.
///
/// Serializes with JSON-LD keys (`@context`, `@type`) so crawlers can treat
/// the document as schema.org structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SesFeed {
    /// JSON-LD context, always [`FEED_CONTEXT`].
    #[serde(rename = "@context")]
    #[schema(example = "https://schema.org")]
    pub context: String,
    /// JSON-LD entity type, always [`FEED_ENTITY_TYPE`].
    #[serde(rename = "@type")]
    #[schema(example = "Person")]
    pub entity_type: String,
    /// Display name of the feed owner, falling back to their email.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Email address of the feed owner.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// One entry per connected account.
    pub social_feeds: Vec<SocialFeedEntry>,
    /// Document metadata.
    pub meta: FeedMeta,
}

/// Feed document as persisted, wrapping the published payload with the
/// storage timestamp. Overwritten wholesale on each generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFeed {
    /// The published document.
    #[serde(flatten)]
    pub feed: SesFeed,
    /// Instant the document was written to the store.
    pub generated_at: DateTime<Utc>,
}
