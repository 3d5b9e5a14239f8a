//! Repository implementations for database access.
//!
//! Each repository:
//! - Wraps a borrowed SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Returns models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Users`]: User accounts, with post counts on reads
//! - [`Posts`]: Posts, always joined with their author
//!
//! # Common Pattern
//!
//! ```ignore
//! use pgapi::db::handlers::{Posts, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Posts::new(&mut conn);
//!     let posts = repo.list(&PostFilter::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod posts;
pub mod repository;
pub mod users;

pub use posts::Posts;
pub use repository::Repository;
pub use users::Users;
