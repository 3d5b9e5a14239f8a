//! # pgapi: REST API for users and posts on PostgreSQL
//!
//! `pgapi` exposes two related resources, users and the posts they own, as JSON over HTTP.
//! Every route maps onto a single repository call against PostgreSQL. Request bodies, paths and
//! query strings are validated by typed extractors before a handler runs, and the API is
//! documented by an OpenAPI descriptor generated at compile time.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum); persistence is PostgreSQL through
//! `sqlx`. A single connection pool is created at startup and handed to every handler through
//! [`AppState`].
//!
//! ### Request Flow
//!
//! ```text
//! TraceLayer → CORS → localize (Accept-Language) → router
//!     → extractor validation (ApiJson / ApiPath / ApiQuery)
//!     → handler → repository (Users / Posts) → PostgreSQL
//!     → JSON response, or Error → status + localized {message}
//! ```
//!
//! ### Core Components
//!
//! - [`api`]: handlers, request/response models and validating extractors
//! - [`db`]: the [`db::handlers::Repository`] trait and the `Users`/`Posts` repositories
//! - [`errors`]: HTTP-facing error type and the data-layer error mapping
//! - [`i18n`]: locale negotiation and the English/Japanese message catalog
//! - [`config`]: YAML + environment configuration
//! - [`telemetry`]: tracing subscriber and optional OTLP export
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use pgapi::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = pgapi::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     pgapi::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations are embedded in the binary and run on startup unless `run_migrations` is false:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! pgapi::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod i18n;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test_utils;

use crate::{
    api::handlers::{health, posts, users},
    config::CorsOrigin,
    openapi::ApiDoc,
};
use axum::http::HeaderValue;
use axum::{
    Json, Router,
    http::{self, StatusCode, Uri},
    middleware::from_fn_with_state,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{PostId, UserId};

/// Application state shared across all request handlers.
///
/// - `db`: PostgreSQL connection pool, created once at startup
/// - `config`: Application configuration loaded from environment/files
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder().db(pool).config(config).build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the pgapi database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect the pool described by the configuration and apply migrations.
#[instrument(skip_all)]
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let settings = &config.database.pool;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .connect(&config.database.url)
        .await?;

    if config.run_migrations {
        info!("Running database migrations");
        migrator().run(&pool).await?;
    }

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PATCH,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT_LANGUAGE])
        .allow_credentials(cors_config.allow_credentials);

    if cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        cors = cors.allow_origin(Any);
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry a trailing slash
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        cors = cors.allow_origin(origins);
    }

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Unmatched paths under `/docs/` land on the interactive docs; anything else is a 404.
async fn docs_fallback(uri: Uri) -> Response {
    if uri.path().starts_with("/docs/") {
        Redirect::temporary("/docs").into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Build the application router with all endpoints and middleware.
///
/// - `/api/users`, `/api/posts`: resource routes
/// - `/`: liveness probe
/// - `/docs/openapi.json`, `/docs`: OpenAPI document and Scalar UI; other `/docs/*` paths
///   redirect to `/docs`
///
/// Layers, outermost first: tracing, CORS, localization.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).patch(users::update_user).delete(users::delete_user),
        )
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post).patch(posts::update_post).delete(posts::delete_post),
        );

    let router = Router::new()
        .route("/", get(health::health))
        .route("/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback(docs_fallback)
        .with_state(state.clone())
        .layer(from_fn_with_state(state.config.default_locale, i18n::localize))
        .layer(create_cors_layer(&state.config)?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Main application struct that owns the router and the connection pool.
///
/// 1. **Create**: [`Application::new`] connects the pool and runs migrations
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests drain, the pool
///    closes and telemetry is flushed
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance, connecting to the configured database
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting pgapi with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::new_with_pool(config, pool)
    }

    /// Create an application around an existing pool. Migrations are not run.
    ///
    /// The configuration is validated here too, since callers may build it without
    /// [`Config::load`].
    pub fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        config.validate()?;
        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "pgapi listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
