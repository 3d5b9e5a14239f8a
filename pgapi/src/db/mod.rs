//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures
//! - [`errors`]: Database-specific error types
//!
//! # Connections
//!
//! A single [`sqlx::PgPool`] is created at startup and shared through
//! [`crate::AppState`]. Repositories borrow a connection or transaction from it:
//!
//! ```ignore
//! use pgapi::db::handlers::{Repository, Users};
//!
//! let mut tx = pool.begin().await?;
//! let mut repo = Users::new(&mut tx);
//! let user = repo.create(&request).await?;
//! tx.commit().await?;
//! ```
//!
//! # Migrations
//!
//! Migrations live in the `migrations/` directory and are embedded at compile time.
//! [`crate::migrator`] runs them:
//!
//! ```ignore
//! pgapi::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
