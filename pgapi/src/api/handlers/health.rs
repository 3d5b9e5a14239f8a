//! Liveness endpoint.

use axum::response::Json;

use crate::api::models::common::HealthResponse;

/// Report that the server is up. Does not touch the database.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse),
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "PostgreSQL RESTful API is running".to_string(),
    })
}
