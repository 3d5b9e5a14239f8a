//! Database record models.
//!
//! These structs carry data between repositories and the API layer. They are kept distinct
//! from the API models so the storage representation (snake_case columns, joined rows) can
//! evolve independently of the JSON contract.
//!
//! - [`users`]: User accounts and their post counts
//! - [`posts`]: Posts and the embedded author projection
//!
//! API request models convert into the `*DBRequest` types with `From`, and the
//! `*DBResponse` types convert into API responses the same way:
//!
//! ```ignore
//! use pgapi::api::models::users::UserResponse;
//!
//! let api_response: UserResponse = db_user.into();
//! ```

pub mod posts;
pub mod users;
