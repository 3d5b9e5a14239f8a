//! OpenAPI document for the users/posts REST API.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PostgreSQL RESTful API",
        version = "0.1.0",
        description = "A RESTful API demonstrating PostgreSQL capabilities",
    ),
    servers(
        (url = "/", description = "This server")
    ),
    paths(
        api::handlers::health::health,
        api::handlers::users::list_users,
        api::handlers::users::get_user,
        api::handlers::users::create_user,
        api::handlers::users::update_user,
        api::handlers::users::delete_user,
        api::handlers::posts::list_posts,
        api::handlers::posts::get_post,
        api::handlers::posts::create_post,
        api::handlers::posts::update_post,
        api::handlers::posts::delete_post,
    ),
    components(
        schemas(
            api::models::users::UserCreate,
            api::models::users::UserUpdate,
            api::models::users::UserResponse,
            api::models::users::PostCount,
            api::models::posts::PostCreate,
            api::models::posts::PostUpdate,
            api::models::posts::PostResponse,
            api::models::posts::AuthorSummary,
            api::models::posts::PublishedFilter,
            api::models::common::MessageResponse,
            api::models::common::ErrorResponse,
            api::models::common::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, update and delete users. Emails are unique."),
        (name = "Posts", description = "Create, read, update and delete posts. Every post belongs to an existing user."),
        (name = "Health", description = "Liveness probe."),
    )
)]
pub struct ApiDoc;
