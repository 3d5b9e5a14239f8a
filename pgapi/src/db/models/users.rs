//! Database models for users.

use crate::api::models::users::{UserCreate, UserUpdate};
use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub email: String,
    pub name: Option<String>,
}

impl From<UserCreate> for UserCreateDBRequest {
    fn from(api: UserCreate) -> Self {
        Self {
            email: api.email.into_inner(),
            name: api.name,
        }
    }
}

/// Database request for updating a user. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<UserUpdate> for UserUpdateDBRequest {
    fn from(api: UserUpdate) -> Self {
        Self {
            email: api.email.map(|email| email.into_inner()),
            name: api.name,
        }
    }
}

/// Database response for a user
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of posts owned by the user; only populated by read queries
    pub post_count: Option<i64>,
}
