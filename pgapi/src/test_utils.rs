//! Test utilities for integration testing.

use crate::config::{Config, DatabaseConfig, PoolSettings};
use crate::db::{
    handlers::{Posts, Repository, Users},
    models::{
        posts::{PostCreateDBRequest, PostDBResponse},
        users::{UserCreateDBRequest, UserDBResponse},
    },
};
use crate::types::UserId;
use axum_test::TestServer;
use sqlx::PgPool;

/// Build a test server over the full router, including the localization and CORS layers.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, pool).expect("Failed to create application");
    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        database: DatabaseConfig {
            // Overridden per test where a real connection is needed
            url: "postgresql://localhost/pgapi_test".to_string(),
            pool: PoolSettings {
                max_connections: 2,
                min_connections: 0,
                ..Default::default()
            },
        },
        run_migrations: true,
        ..Default::default()
    }
}

pub async fn create_test_user(pool: &PgPool, email: &str, name: Option<&str>) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users = Users::new(&mut conn);

    let request = UserCreateDBRequest {
        email: email.to_string(),
        name: name.map(str::to_string),
    };
    users.create(&request).await.expect("Failed to create test user")
}

pub async fn create_test_post(pool: &PgPool, author_id: UserId, title: &str, published: bool) -> PostDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut posts = Posts::new(&mut conn);

    let request = PostCreateDBRequest {
        title: title.to_string(),
        content: Some(format!("Body of {title}")),
        published,
        author_id,
    };
    posts.create(&request).await.expect("Failed to create test post")
}
