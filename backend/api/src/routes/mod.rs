//! API routes within the application. Mainly exposes sub-routers which are
//! assembled into the complete application by `create_app`.
pub mod health;
pub mod weather;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{middleware::cors::cors_layer, state::AppState};

/// Normalise a mount prefix to `/segment[/segment...]` without a trailing
/// slash. The root prefix becomes the empty string.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Assemble every sub-router under `prefix` and apply the shared layers.
pub fn create_app(state: AppState, prefix: &str) -> Router {
    let api = Router::new()
        .merge(health::create_router())
        .nest("/weather", weather::create_router());
    let prefix = normalize_prefix(prefix);
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&prefix, api)
    };
    app.layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
