//! Defines the state shared across the Axum application.
use crate::{db, services::ingest::WeatherApiClient};

#[derive(Clone)]
/// The state struct shared across routers.
pub struct AppState {
    /// A database connection pool for getting new database connections.
    pub db: db::ConnectionPool,
    /// Client for the upstream weather data provider.
    pub weather_api: WeatherApiClient,
}
