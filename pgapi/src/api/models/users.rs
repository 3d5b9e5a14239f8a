//! API request/response models for users.

use crate::api::models::common::present_or_absent;
use crate::db::models::users::UserDBResponse;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Reason an email address was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEmail {
    #[error("email must not contain whitespace")]
    Whitespace,
    #[error("email must contain exactly one '@'")]
    MissingAt,
    #[error("email local part must not be empty")]
    EmptyLocalPart,
    #[error("email domain must contain a '.' separating non-empty labels")]
    InvalidDomain,
}

/// An email address that passed syntactic validation.
///
/// Deserialization fails for malformed addresses, so a request body carrying one is
/// rejected before any handler runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidEmail> {
        let raw = raw.into();
        if raw.chars().any(char::is_whitespace) {
            return Err(InvalidEmail::Whitespace);
        }
        let (local, domain) = match raw.split_once('@') {
            Some((local, domain)) if !domain.contains('@') => (local, domain),
            _ => return Err(InvalidEmail::MissingAt),
        };
        if local.is_empty() {
            return Err(InvalidEmail::EmptyLocalPart);
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(InvalidEmail::InvalidDomain);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Email {
    type Error = InvalidEmail;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// User request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCreate {
    #[schema(value_type = String, format = "email", example = "alice@example.com")]
    pub email: Email,
    #[serde(default, deserialize_with = "present_or_absent")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserUpdate {
    #[serde(default, deserialize_with = "present_or_absent")]
    #[schema(value_type = Option<String>, format = "email")]
    pub email: Option<Email>,
    #[serde(default, deserialize_with = "present_or_absent")]
    pub name: Option<String>,
}

/// Number of records owned by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostCount {
    pub posts: i64,
}

// User response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Post count, present on list and single-user reads
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<PostCount>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            email: db.email,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
            count: db.post_count.map(|posts| PostCount { posts }),
        }
    }
}
