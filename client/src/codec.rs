//! Candid wire records for the news canister.
//!
//! Replies decode into these records first, then map into domain snapshots
//! in one pass. Field names follow the canister's camelCase declarations.

use candid::CandidType;
use serde::Deserialize;

use crate::domain::{Article, ArticleId, Journalist, JournalistId, User, UserId};

/// Wire form of [`Article`].
#[derive(Debug, Clone, PartialEq, Eq, CandidType, Deserialize)]
pub struct ArticleRecord {
    /// Article identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Topic the article is filed under.
    pub topic: String,
    /// Author identifier.
    #[serde(rename = "journalistId")]
    pub journalist_id: String,
}

/// Wire form of [`User`].
#[derive(Debug, Clone, PartialEq, Eq, CandidType, Deserialize)]
pub struct UserRecord {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Requested topics in remote order.
    #[serde(rename = "requestedTopics")]
    pub requested_topics: Vec<String>,
}

/// Wire form of [`Journalist`].
#[derive(Debug, Clone, PartialEq, Eq, CandidType, Deserialize)]
pub struct JournalistRecord {
    /// Journalist identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Uploaded articles.
    pub articles: Vec<ArticleRecord>,
}

impl From<ArticleRecord> for Article {
    fn from(value: ArticleRecord) -> Self {
        Self::new(
            ArticleId::new(value.id),
            value.title,
            value.content,
            value.topic,
            JournalistId::new(value.journalist_id),
        )
    }
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        Self::new(
            UserId::new(value.id),
            value.name,
            value.email,
            value.requested_topics,
        )
    }
}

impl From<JournalistRecord> for Journalist {
    fn from(value: JournalistRecord) -> Self {
        Self::new(
            JournalistId::new(value.id),
            value.name,
            value.email,
            value.articles.into_iter().map(Article::from).collect(),
        )
    }
}
