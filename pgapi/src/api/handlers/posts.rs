//! HTTP handlers for post endpoints.

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, instrument};

use crate::{
    AppState,
    api::extract::{ApiJson, ApiPath, ApiQuery},
    api::models::common::{ErrorResponse, MessageResponse},
    api::models::posts::{ListPostsQuery, PostCreate, PostResponse, PostUpdate},
    db::errors::DbError,
    db::handlers::{Posts, Repository, Users, posts::PostFilter},
    db::models::posts::PostCreateDBRequest,
    errors::{Error, Result},
    i18n::{Locale, Message},
    types::{PostId, Resource, UserId},
};

/// List posts, newest first, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    summary = "Get all posts",
    description = "Retrieve posts ordered by creation time, newest first. Filters combine with AND.",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "List of posts retrieved successfully", body = [PostResponse]),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn list_posts(State(state): State<AppState>, ApiQuery(query): ApiQuery<ListPostsQuery>) -> Result<Json<Vec<PostResponse>>> {
    let filter: PostFilter = query.into();
    debug!(?filter, "Listing posts");

    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::FetchPostsFailed))?;
    let posts = Posts::new(&mut conn)
        .list(&filter)
        .await
        .map_err(|e| Error::from_db(e, Message::FetchPostsFailed))?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// Get a single post with its author.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Get a post by ID",
    params(
        ("id" = i32, Path, description = "Post ID"),
    ),
    responses(
        (status = 200, description = "Post retrieved successfully", body = PostResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all, fields(post_id = id))]
pub async fn get_post(State(state): State<AppState>, ApiPath(id): ApiPath<PostId>) -> Result<Json<PostResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::FetchPostFailed))?;
    let post = Posts::new(&mut conn)
        .get_by_id(id)
        .await
        .map_err(|e| Error::from_db(e, Message::FetchPostFailed))?
        .ok_or(Error::NotFound {
            resource: Resource::Post,
            id,
        })?;

    Ok(Json(post.into()))
}

/// Create a post for an existing author.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    summary = "Create a new post",
    request_body = PostCreate,
    responses(
        (status = 201, description = "Post created successfully", body = PostResponse),
        (status = 400, description = "Invalid request data or author not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PostCreate>,
) -> Result<(StatusCode, Json<PostResponse>)> {
    let author_id = request.author_id;

    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::CreatePostFailed))?;

    let author_exists = Users::new(&mut conn)
        .exists(author_id)
        .await
        .map_err(|e| Error::from_db(e, Message::CreatePostFailed))?;
    if !author_exists {
        return Err(Error::InvalidReference {
            resource: Resource::User,
            id: author_id,
        });
    }

    let db_request: PostCreateDBRequest = request.into();
    let post = Posts::new(&mut conn)
        .create(&db_request)
        .await
        .map_err(|e| insert_failure(e, author_id))?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Map a failed post insert. A foreign-key violation means the author was removed between the
/// existence check and the insert.
fn insert_failure(err: DbError, author_id: UserId) -> Error {
    match err {
        DbError::ForeignKeyViolation { .. } => Error::InvalidReference {
            resource: Resource::User,
            id: author_id,
        },
        e => Error::from_db(e, Message::CreatePostFailed),
    }
}

/// Update a post. Only the supplied fields change.
#[utoipa::path(
    patch,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Update a post",
    params(
        ("id" = i32, Path, description = "Post ID"),
    ),
    request_body = PostUpdate,
    responses(
        (status = 200, description = "Post updated successfully", body = PostResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all, fields(post_id = id))]
pub async fn update_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PostId>,
    ApiJson(request): ApiJson<PostUpdate>,
) -> Result<Json<PostResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::UpdatePostFailed))?;
    let post = Posts::new(&mut conn)
        .update(id, &request.into())
        .await
        .map_err(|e| match e {
            DbError::NotFound => Error::NotFound {
                resource: Resource::Post,
                id,
            },
            e => Error::from_db(e, Message::UpdatePostFailed),
        })?;

    Ok(Json(post.into()))
}

/// Delete a post.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    summary = "Delete a post",
    params(
        ("id" = i32, Path, description = "Post ID"),
    ),
    responses(
        (status = 200, description = "Post deleted successfully", body = MessageResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all, fields(post_id = id))]
pub async fn delete_post(
    State(state): State<AppState>,
    locale: Locale,
    ApiPath(id): ApiPath<PostId>,
) -> Result<Json<MessageResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::DeletePostFailed))?;
    let deleted = Posts::new(&mut conn)
        .delete(id)
        .await
        .map_err(|e| Error::from_db(e, Message::DeletePostFailed))?;

    if !deleted {
        return Err(Error::NotFound {
            resource: Resource::Post,
            id,
        });
    }

    Ok(Json(MessageResponse::new(Message::PostDeleted.text(locale))))
}
