//! Entry point for the MedClimate API: loads configuration, prepares the
//! database and serves the HTTP routes.
mod constants;
mod db;
mod middleware;
mod routes;
mod services;
mod state;
mod utils;

use constants::api::{API_HOST, API_PORT, API_TITLE, API_URI_PREFIX, API_VERSION};

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside development.
    let _ = dotenv::dotenv();
    utils::logging::init_tracing();

    let db = db::connect()
        .await
        .expect("Failed to connect to the database");
    db::init_schema(&db)
        .await
        .expect("Failed to create the database schema");

    let weather_api = services::ingest::WeatherApiClient::from_env()
        .expect("Failed to build the weather API client");
    if !weather_api.is_enabled() {
        tracing::warn!("API_KEY not provided, ingestion from the weather API is disabled");
    }

    let app = routes::create_app(state::AppState { db, weather_api }, &API_URI_PREFIX);

    let address = format!("{}:{}", *API_HOST, *API_PORT);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind listener");
    tracing::info!("{API_TITLE} {API_VERSION} listening on {address}");
    axum::serve(listener, app)
        .await
        .expect("Failed to init Axum service");
}
