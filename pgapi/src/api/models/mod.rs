//! API request and response data models.
//!
//! These structures define the public JSON contract. They are kept separate from the
//! database models in [`crate::db::models`] so the wire format and the storage layout
//! can change independently.
//!
//! - [`users`]: user payloads and the validated [`users::Email`] type
//! - [`posts`]: post payloads, the embedded author summary and list filters
//! - [`common`]: confirmation, error and liveness bodies
//!
//! All fields use camelCase on the wire and every model derives `utoipa::ToSchema`
//! so it appears in the generated OpenAPI document.

pub mod common;
pub mod posts;
pub mod users;
