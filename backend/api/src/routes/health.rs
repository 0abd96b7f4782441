//! Service metadata and liveness routes.
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{
    constants::api::{API_TITLE, API_VERSION},
    state::AppState,
};

/// Create a router for the root and health check routes.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/version", get(version))
}

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    title: &'static str,
    description: &'static str,
    version: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to MedClimate API",
    })
}

/// Simply a healthcheck that this service is functional.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        title: API_TITLE,
        description: "API for climate data analysis in Medellin",
        version: API_VERSION,
    })
}
