//! User data model.

use serde::Serialize;

use super::UserId;

/// Reader registered with the news canister.
///
/// ## Invariants
/// - `id` is unique among users and never reused (enforced remotely).
/// - `requested_topics` keeps the order and duplicates reported remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    requested_topics: Vec<String>,
}

impl User {
    /// Build a user snapshot from its components.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        requested_topics: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            requested_topics,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
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

    /// Topics the user asked to follow.
    pub fn requested_topics(&self) -> &[String] {
        &self.requested_topics
    }

    /// Return whether `topic` appears among the requested topics.
    pub fn has_requested(&self, topic: &str) -> bool {
        self.requested_topics.iter().any(|candidate| candidate == topic)
    }
}
