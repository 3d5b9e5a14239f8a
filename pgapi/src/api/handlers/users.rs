//! HTTP handlers for user endpoints.

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::instrument;

use crate::{
    AppState,
    api::extract::{ApiJson, ApiPath},
    api::models::common::{ErrorResponse, MessageResponse},
    api::models::users::{UserCreate, UserResponse, UserUpdate},
    db::errors::DbError,
    db::handlers::{Repository, Users, users::UserFilter},
    errors::{Error, Result},
    i18n::{Locale, Message},
    types::{Resource, UserId},
};

/// List all users with their post counts.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    summary = "Get all users",
    description = "Retrieve every user, each annotated with the number of posts they own.",
    responses(
        (status = 200, description = "List of users retrieved successfully", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::FetchUsersFailed))?;
    let users = Users::new(&mut conn)
        .list(&UserFilter)
        .await
        .map_err(|e| Error::from_db(e, Message::FetchUsersFailed))?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get a single user by ID.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Get a user by ID",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = UserResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all, fields(user_id = id))]
pub async fn get_user(State(state): State<AppState>, ApiPath(id): ApiPath<UserId>) -> Result<Json<UserResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::FetchUserFailed))?;
    let user = Users::new(&mut conn)
        .get_by_id(id)
        .await
        .map_err(|e| Error::from_db(e, Message::FetchUserFailed))?
        .ok_or(Error::NotFound {
            resource: Resource::User,
            id,
        })?;

    Ok(Json(user.into()))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    summary = "Create a new user",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid request data or email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::CreateUserFailed))?;
    let user = Users::new(&mut conn)
        .create(&request.into())
        .await
        .map_err(|e| Error::from_db(e, Message::CreateUserFailed))?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Update a user. Only the supplied fields change.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Update a user",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid request data or email already in use", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all, fields(user_id = id))]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(request): ApiJson<UserUpdate>,
) -> Result<Json<UserResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::UpdateUserFailed))?;
    let user = Users::new(&mut conn)
        .update(id, &request.into())
        .await
        .map_err(|e| match e {
            DbError::NotFound => Error::NotFound {
                resource: Resource::User,
                id,
            },
            e => Error::from_db(e, Message::UpdateUserFailed),
        })?;

    Ok(Json(user.into()))
}

/// Delete a user and, through the foreign key, their posts.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Delete a user",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[instrument(skip_all, fields(user_id = id))]
pub async fn delete_user(
    State(state): State<AppState>,
    locale: Locale,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<MessageResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::from_db(e.into(), Message::DeleteUserFailed))?;
    let deleted = Users::new(&mut conn)
        .delete(id)
        .await
        .map_err(|e| Error::from_db(e, Message::DeleteUserFailed))?;

    if !deleted {
        return Err(Error::NotFound {
            resource: Resource::User,
            id,
        });
    }

    Ok(Json(MessageResponse::new(Message::UserDeleted.text(locale))))
}

#[cfg(test)]
mod tests {
    use crate::api::models::common::{ErrorResponse, MessageResponse};
    use crate::api::models::posts::PostResponse;
    use crate::api::models::users::UserResponse;
    use crate::test_utils::{create_test_app, create_test_post, create_test_user};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_then_get_user(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app
            .post("/api/users")
            .json(&json!({"email": "alice@example.com", "name": "Alice"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: UserResponse = response.json();
        assert_eq!(created.email, "alice@example.com");
        assert_eq!(created.name.as_deref(), Some("Alice"));
        assert!(created.count.is_none());

        let response = app.get(&format!("/api/users/{}", created.id)).await;
        response.assert_status_ok();
        let fetched: UserResponse = response.json();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.email, created.email);
        assert_eq!(fetched.created_at, created.created_at);
        assert_eq!(fetched.count.map(|c| c.posts), Some(0));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_user_without_name(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.post("/api/users").json(&json!({"email": "anon@example.com"})).await;
        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert!(body["name"].is_null());
        assert!(body.get("createdAt").is_some());
        assert!(body.get("updatedAt").is_some());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_email_returns_fixed_conflict_message(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let first = create_test_user(&pool, "dup@example.com", Some("First")).await;

        let response = app
            .post("/api/users")
            .json(&json!({"email": "dup@example.com", "name": "Second"}))
            .await;
        response.assert_status_bad_request();
        let body: ErrorResponse = response.json();
        assert_eq!(body.message, "This value already exists. Please provide a unique value.");
        assert!(body.details.is_none());

        let response = app.get(&format!("/api/users/{}", first.id)).await;
        response.assert_status_ok();
        let still_there: UserResponse = response.json();
        assert_eq!(still_there.name.as_deref(), Some("First"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_conflict_message_is_localized(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "taken@example.com", None).await;

        let response = app
            .post("/api/users")
            .add_header("accept-language", "ja-JP,ja;q=0.9")
            .json(&json!({"email": "taken@example.com"}))
            .await;
        response.assert_status_bad_request();
        let body: ErrorResponse = response.json();
        assert_eq!(body.message, "このデータは既に存在します。一意の値を指定してください。");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_missing_user_is_404(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        for id in [1, 999_999, -5] {
            let response = app.get(&format!("/api/users/{id}")).await;
            response.assert_status_not_found();
            let body: ErrorResponse = response.json();
            assert_eq!(body.message, "User not found");
        }

        let response = app.get("/api/users/777").add_header("accept-language", "ja").await;
        response.assert_status_not_found();
        let body: ErrorResponse = response.json();
        assert_eq!(body.message, "ユーザーが見つかりません");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_invalid_input_is_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        app.get("/api/users/not-a-number").await.assert_status_bad_request();
        app.post("/api/users").json(&json!({"name": "No Email"})).await.assert_status_bad_request();
        app.post("/api/users")
            .json(&json!({"email": "not-an-email"}))
            .await
            .assert_status_bad_request();
        app.patch("/api/users/1")
            .json(&json!({"email": "still bad@example.com"}))
            .await
            .assert_status_bad_request();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_null_fields_are_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, "named@example.com", Some("Named")).await;

        for body in [json!({"name": null}), json!({"email": null})] {
            let response = app.patch(&format!("/api/users/{}", user.id)).json(&body).await;
            response.assert_status_bad_request();
            let error: ErrorResponse = response.json();
            assert_eq!(error.message, "Invalid request data");
        }

        app.post("/api/users")
            .json(&json!({"email": "fresh@example.com", "name": null}))
            .await
            .assert_status_bad_request();

        let response = app.get(&format!("/api/users/{}", user.id)).await;
        let unchanged: UserResponse = response.json();
        assert_eq!(unchanged.name.as_deref(), Some("Named"));
        assert_eq!(unchanged.email, "named@example.com");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_users_with_post_counts(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let alice = create_test_user(&pool, "alice@example.com", None).await;
        let bob = create_test_user(&pool, "bob@example.com", None).await;
        create_test_post(&pool, alice.id, "one", true).await;
        create_test_post(&pool, alice.id, "two", false).await;

        let response = app.get("/api/users").await;
        response.assert_status_ok();
        let users: Vec<UserResponse> = response.json();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, alice.id);
        assert_eq!(users[0].count.map(|c| c.posts), Some(2));
        assert_eq!(users[1].id, bob.id);
        assert_eq!(users[1].count.map(|c| c.posts), Some(0));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_user(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, "old@example.com", Some("Old")).await;

        let response = app
            .patch(&format!("/api/users/{}", user.id))
            .json(&json!({"name": "New"}))
            .await;
        response.assert_status_ok();
        let updated: UserResponse = response.json();
        assert_eq!(updated.name.as_deref(), Some("New"));
        assert_eq!(updated.email, "old@example.com");

        app.patch("/api/users/424242")
            .json(&json!({"name": "Ghost"}))
            .await
            .assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_empty_patch_leaves_fields_unchanged(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, "same@example.com", Some("Same")).await;

        let response = app.patch(&format!("/api/users/{}", user.id)).json(&json!({})).await;
        response.assert_status_ok();
        let updated: UserResponse = response.json();
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.created_at, user.created_at);
        assert!(updated.updated_at >= user.updated_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_email_collision_is_conflict(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_user(&pool, "first@example.com", None).await;
        let second = create_test_user(&pool, "second@example.com", None).await;

        let response = app
            .patch(&format!("/api/users/{}", second.id))
            .json(&json!({"email": "first@example.com"}))
            .await;
        response.assert_status_bad_request();
        let body: ErrorResponse = response.json();
        assert_eq!(body.message, "This value already exists. Please provide a unique value.");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_then_get_is_404(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, "bye@example.com", None).await;
        let post = create_test_post(&pool, user.id, "cascade", true).await;

        let response = app.delete(&format!("/api/users/{}", user.id)).await;
        response.assert_status_ok();
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "User deleted successfully");

        app.get(&format!("/api/users/{}", user.id)).await.assert_status_not_found();
        app.delete(&format!("/api/users/{}", user.id)).await.assert_status_not_found();
        app.get(&format!("/api/posts/{}", post.id)).await.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_confirmation_is_localized(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, "sayonara@example.com", None).await;

        let response = app
            .delete(&format!("/api/users/{}", user.id))
            .add_header("accept-language", "ja")
            .await;
        response.assert_status_ok();
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "ユーザーが正常に削除されました");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_user_posts_embed_author(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, "embed@example.com", Some("Embed")).await;
        let post = create_test_post(&pool, user.id, "embedded", false).await;

        let response = app.get(&format!("/api/posts/{}", post.id)).await;
        response.assert_status_ok();
        let fetched: PostResponse = response.json();
        assert_eq!(fetched.author.id, user.id);
        assert_eq!(fetched.author.email, "embed@example.com");
        assert_eq!(fetched.author.name.as_deref(), Some("Embed"));
    }
}
