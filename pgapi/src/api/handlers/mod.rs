//! HTTP request handlers for all API endpoints.
//!
//! Each handler acquires a connection from the pool in [`crate::AppState`], runs one
//! repository call (plus the author existence check for post creation) and maps the
//! outcome to a response.
//!
//! # Handler Modules
//!
//! - [`users`]: User CRUD under `/api/users`
//! - [`posts`]: Post CRUD and filtered listing under `/api/posts`
//! - [`health`]: Liveness probe at `/`
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`], which converts to a status code and a
//! localized JSON body. Data-layer failures go through [`crate::errors::Error::from_db`].

pub mod health;
pub mod posts;
pub mod users;
