//! Ingestion of current conditions from the upstream weather data provider.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::weatherapi::{API_KEY, API_TIMEOUT, API_URL},
    db::{
        self,
        models::weather_record::{validate_location, WeatherRecordInsert},
    },
    utils::timestamp,
};

/// REST client for the weather provider's `current.json` endpoint.
#[derive(Clone, Debug)]
pub struct WeatherApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

/// The subset of the provider's current conditions response which is stored.
#[derive(Deserialize, Debug)]
pub struct CurrentResponse {
    current: CurrentConditions,
}

#[derive(Deserialize, Debug)]
struct CurrentConditions {
    /// Unix time the provider last refreshed this observation.
    last_updated_epoch: Option<i64>,
    temp_c: Option<f64>,
    humidity: Option<f64>,
    precip_mm: Option<f64>,
}

impl WeatherApiClient {
    /// Create a new client. Without an API key the client is constructed but
    /// every fetch fails with `IngestError::Disabled`.
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, errors::IngestError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    /// Create a client from the configured environment.
    pub fn from_env() -> Result<Self, errors::IngestError> {
        Self::new(&API_URL, API_KEY.clone())
    }

    /// Whether an API key is configured.
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current conditions for a location.
    pub async fn current(&self, location: &str) -> Result<CurrentResponse, errors::IngestError> {
        let api_key = self.api_key.as_deref().ok_or(errors::IngestError::Disabled)?;
        let url = format!("{}/current.json", self.base_url);

        debug!("Fetching current conditions for {location} from {url}");

        let response = self
            .http
            .get(&url)
            .query(&[("key", api_key), ("q", location)])
            .send()
            .await?;

        let status = response.status();
        // The provider answers 400 (or 404) when `q` matches no location.
        if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
            return Err(errors::IngestError::LocationNotFound(location.to_owned()));
        }
        if !status.is_success() {
            return Err(errors::IngestError::Upstream(format!(
                "Failed to fetch current conditions: {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|err| errors::IngestError::Malformed(err.to_string()))
    }
}

impl CurrentResponse {
    /// Convert the provider's observation into a record for `location`. The
    /// requested location name is kept rather than the provider's spelling so
    /// that later queries by that name find the record.
    pub fn into_insert(self, location: &str) -> Result<WeatherRecordInsert, errors::IngestError> {
        let observed_at = match self.current.last_updated_epoch {
            Some(epoch) => timestamp::from_unix(epoch)
                .map_err(|err| errors::IngestError::Malformed(err.to_string()))?,
            None => timestamp::now_utc(),
        };
        Ok(WeatherRecordInsert {
            timestamp: observed_at,
            temperature: self.current.temp_c,
            humidity: self.current.humidity,
            precipitation: self.current.precip_mm,
            location: location.to_owned(),
        }
        .validate()?)
    }
}

/// Fetch current conditions for a location and store them. Returns the new
/// record's ID along with what was stored.
pub async fn ingest_current(
    client: &WeatherApiClient,
    location: &str,
    db_conn: &db::ConnectionPool,
) -> Result<(i32, WeatherRecordInsert), errors::IngestError> {
    let location = validate_location(location).map_err(errors::IngestError::Location)?;
    let record = client.current(location).await?.into_insert(location)?;
    let id = record.store(db_conn).await?;
    tracing::info!("Ingested current conditions for {} as record {id}", record.location);
    Ok((id, record))
}

pub mod errors {
    use crate::db::{errors::DatabaseError, models::weather_record::InvalidRecord};
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum IngestError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("No weather API key is configured")]
        Disabled,
        #[error("HTTP request failed: {0}")]
        RequestFailed(#[from] reqwest::Error),
        #[error("The weather API knows no location matching {0:?}")]
        LocationNotFound(String),
        #[error("Weather API error: {0}")]
        Upstream(String),
        #[error("Weather API response could not be read: {0}")]
        Malformed(String),
        #[error("Weather API returned an implausible observation: {0}")]
        Invalid(#[from] InvalidRecord),
        #[error(transparent)]
        Location(InvalidRecord),
    }
}

/// A local stand-in for the weather provider.
#[cfg(test)]
pub mod testing {
    use axum::{http::StatusCode, routing::get, Router};

    /// Serve `body` with `status` from `/current.json` on an ephemeral port and
    /// return the base URL.
    pub async fn provider_stub(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/current.json",
            get(move || async move {
                (status, [("content-type", "application/json")], body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{address}")
    }

    pub const UNKNOWN_LOCATION: &str =
        r#"{"error": {"code": 1006, "message": "No matching location found."}}"#;
}
