//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//! - **[`extract`]**: Extractors that turn malformed input into validation errors
//!
//! # API Structure
//!
//! - **Users** (`/api/users/*`): list, get, create, update, delete
//! - **Posts** (`/api/posts/*`): list with `published`/`authorId` filters, get, create, update, delete
//! - **Health** (`/`): liveness probe
//!
//! # OpenAPI Documentation
//!
//! All endpoints are annotated with `utoipa`. The generated document is served at
//! `/docs/openapi.json` and rendered interactively at `/docs`.

pub mod extract;
pub mod handlers;
pub mod models;
