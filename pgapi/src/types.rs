//! Common type definitions shared by the API and database layers.
//!
//! Both entities use auto-incrementing integer keys, wrapped in type aliases so signatures
//! say which table an id belongs to.
//!
//! - [`UserId`]: User identifier
//! - [`PostId`]: Post identifier
//!
//! [`Resource`] names the entity kind in error responses and log lines.

use std::fmt;

// Type aliases for IDs
pub type UserId = i32;
pub type PostId = i32;

/// The kind of entity an operation was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Post,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::User => write!(f, "User"),
            Resource::Post => write!(f, "Post"),
        }
    }
}
