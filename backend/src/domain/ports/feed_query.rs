//! Driving port for reading the stored feed.

use async_trait::async_trait;

use crate::domain::{Error, StoredFeed, UserId};

/// Message returned when no feed has been generated yet.
pub const NO_FEED_MESSAGE: &str = "No feed generated yet. Please generate your feed first.";

/// Domain use-case port for stored feed reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// The user's stored feed; not found until one has been generated.
    async fn fetch(&self, user_id: &UserId) -> Result<StoredFeed, Error>;
}

/// Fixture query mirroring a store with no generated feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedQuery;

#[async_trait]
impl FeedQuery for FixtureFeedQuery {
    async fn fetch(&self, _user_id: &UserId) -> Result<StoredFeed, Error> {
        Err(Error::not_found(NO_FEED_MESSAGE))
    }
}
