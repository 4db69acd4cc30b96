//! Driving port describing the news canister's typed interface.
//!
//! Callers depend on this trait rather than on a concrete client so tests
//! and alternative transports can stand in for the canister.

use async_trait::async_trait;

use crate::domain::{Journalist, JournalistId, NewsClientError, User, UserId};

/// Typed view of the remote news-publishing service.
///
/// Every method is one independent remote round trip. Implementations keep
/// no cache, so two reads may observe different snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsService: Send + Sync {
    /// Fetch the user bound to the caller's identity, if one exists.
    async fn get_user(&self) -> Result<Option<User>, NewsClientError>;

    /// Fetch a snapshot of every user.
    async fn get_all_users(&self) -> Result<Vec<User>, NewsClientError>;

    /// Create a user. Identical arguments create distinct users.
    async fn create_user(&self, name: &str, email: &str) -> Result<(), NewsClientError>;

    /// Append `topic` to the user's requested topics.
    async fn request_topic(&self, user_id: &UserId, topic: &str) -> Result<(), NewsClientError>;

    /// Fetch a snapshot of every journalist with their articles.
    async fn get_all_journalists(&self) -> Result<Vec<Journalist>, NewsClientError>;

    /// Fetch one journalist; `Ok(None)` when no journalist has this id.
    async fn get_journalist_by_id(
        &self,
        journalist_id: &JournalistId,
    ) -> Result<Option<Journalist>, NewsClientError>;

    /// Create a journalist.
    async fn create_journalist(&self, name: &str, email: &str) -> Result<(), NewsClientError>;

    /// Attach a new article to the journalist.
    async fn upload_article(
        &self,
        journalist_id: &JournalistId,
        title: &str,
        content: &str,
        topic: &str,
    ) -> Result<(), NewsClientError>;
}
