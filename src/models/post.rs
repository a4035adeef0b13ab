use super::content_type::ContentType;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed payload carried by a post. `data` is a URL or path for media
/// and the literal body for text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub data: String,
}

/// A validated post payload, holding only the recognized fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: Option<String>,
    pub email: String,
    pub password: String,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub content: Content,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Builds a fresh record with a new identifier.
    pub fn create(new_post: NewPost) -> Self {
        let now = now();
        Post {
            id: Uuid::new_v4().to_string(),
            user_id: new_post.user_id,
            email: new_post.email,
            password: new_post.password,
            content: new_post.content,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Overwrites the mutable fields. A missing `user_id` keeps the current one.
    pub fn apply(&mut self, changes: NewPost, at: DateTime<Utc>) {
        if changes.user_id.is_some() {
            self.user_id = changes.user_id;
        }
        self.email = changes.email;
        self.password = changes.password;
        self.content = changes.content;
        self.updated_at = at;
    }

    /// Marks the record deleted. A second call keeps the first timestamp.
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(at);
            self.updated_at = at;
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Current time truncated to the microsecond precision of `DATETIME(6)`.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
