//! Database repository for posts.

use crate::types::{PostId, UserId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::posts::{AuthorDBResponse, PostCreateDBRequest, PostDBResponse, PostUpdateDBRequest},
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Filter for listing posts. Both criteria are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub published: Option<bool>,
    pub author_id: Option<UserId>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }
}

// Post row joined with the author's public columns
#[derive(Debug, Clone, FromRow)]
struct Post {
    pub id: PostId,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub author_email: String,
}

impl From<Post> for PostDBResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author: AuthorDBResponse {
                id: post.author_id,
                name: post.author_name,
                email: post.author_email,
            },
        }
    }
}

pub struct Posts<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Posts<'c> {
    type CreateRequest = PostCreateDBRequest;
    type UpdateRequest = PostUpdateDBRequest;
    type Response = PostDBResponse;
    type Id = PostId;
    type Filter = PostFilter;

    #[instrument(skip(self, request), fields(author_id = request.author_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (title, content, published, author_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT p.id, p.title, p.content, p.published, p.author_id, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM inserted p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(&request.title)
        .bind(&request.content)
        .bind(request.published)
        .bind(request.author_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(post.into())
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.title, p.content, p.published, p.author_id, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(post.map(Into::into))
    }

    #[instrument(skip(self, filter), fields(published = ?filter.published, author_id = ?filter.author_id), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.title, p.content, p.published, p.author_id, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE ($1::boolean IS NULL OR p.published = $1)
              AND ($2::integer IS NULL OR p.author_id = $2)
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .bind(filter.published)
        .bind(filter.author_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            WITH updated AS (
                UPDATE posts SET
                    title = COALESCE($2, title),
                    content = COALESCE($3, content),
                    published = COALESCE($4, published),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT p.id, p.title, p.content, p.published, p.author_id, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM updated p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(request.published)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(post.into())
    }
}

impl<'c> Posts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}
