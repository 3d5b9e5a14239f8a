//! Database models for posts.

use crate::api::models::posts::{PostCreate, PostUpdate};
use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a new post
#[derive(Debug, Clone)]
pub struct PostCreateDBRequest {
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: UserId,
}

impl From<PostCreate> for PostCreateDBRequest {
    fn from(api: PostCreate) -> Self {
        Self {
            title: api.title,
            content: api.content,
            published: api.published,
            author_id: api.author_id,
        }
    }
}

/// Database request for updating a post. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostUpdateDBRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl From<PostUpdate> for PostUpdateDBRequest {
    fn from(api: PostUpdate) -> Self {
        Self {
            title: api.title,
            content: api.content,
            published: api.published,
        }
    }
}

/// Reduced projection of the owning user embedded in post responses
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDBResponse {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
}

/// Database response for a post, joined with its author
#[derive(Debug, Clone)]
pub struct PostDBResponse {
    pub id: PostId,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorDBResponse,
}
