//! Database repository for users.

use crate::types::UserId;
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest},
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Filter for listing users. The list is unfiltered and unpaginated.
#[derive(Debug, Clone, Default)]
pub struct UserFilter;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub post_count: Option<i64>,
}

impl From<User> for UserDBResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
            post_count: user.post_count,
        }
    }
}

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Users<'c> {
    type CreateRequest = UserCreateDBRequest;
    type UpdateRequest = UserUpdateDBRequest;
    type Response = UserDBResponse;
    type Id = UserId;
    type Filter = UserFilter;

    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            RETURNING id, email, name, created_at, updated_at
            "#,
        )
        .bind(&request.email)
        .bind(&request.name)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user.into())
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.name, u.created_at, u.updated_at,
                   (SELECT COUNT(*) FROM posts p WHERE p.author_id = u.id) AS post_count
            FROM users u
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(user.map(Into::into))
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.name, u.created_at, u.updated_at,
                   (SELECT COUNT(*) FROM posts p WHERE p.author_id = u.id) AS post_count
            FROM users u
            ORDER BY u.id ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Existence check and mutation are one statement, so there is no window for a
        // concurrent delete between them.
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.email)
        .bind(&request.name)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(user.into())
    }
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Check whether a user with the given ID exists.
    #[instrument(skip(self), err)]
    pub async fn exists(&mut self, id: UserId) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(exists)
    }
}
