//! Journalist and article data models.

use serde::Serialize;

use super::{ArticleId, JournalistId};

/// Article published by a journalist.
///
/// ## Invariants
/// - `journalist_id` references an existing journalist (enforced remotely).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    id: ArticleId,
    title: String,
    content: String,
    topic: String,
    journalist_id: JournalistId,
}

impl Article {
    /// Build an article snapshot from its components.
    pub fn new(
        id: ArticleId,
        title: impl Into<String>,
        content: impl Into<String>,
        topic: impl Into<String>,
        journalist_id: JournalistId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            topic: topic.into(),
            journalist_id,
        }
    }

    /// Stable article identifier.
    pub fn id(&self) -> &ArticleId {
        &self.id
    }

    /// Headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Body text.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Topic the article is filed under.
    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    /// Author of the article.
    pub fn journalist_id(&self) -> &JournalistId {
        &self.journalist_id
    }
}

/// Journalist together with the articles they have uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Journalist {
    id: JournalistId,
    name: String,
    email: String,
    articles: Vec<Article>,
}

impl Journalist {
    /// Build a journalist snapshot from its components.
    pub fn new(
        id: JournalistId,
        name: impl Into<String>,
        email: impl Into<String>,
        articles: Vec<Article>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            articles,
        }
    }

    /// Stable journalist identifier.
    pub fn id(&self) -> &JournalistId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Articles in upload order as reported remotely.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Find the first article with a matching title, content, and topic.
    pub fn find_article(&self, title: &str, content: &str, topic: &str) -> Option<&Article> {
        self.articles.iter().find(|article| {
            article.title() == title && article.content() == content && article.topic() == topic
        })
    }
}
