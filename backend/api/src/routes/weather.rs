//! Routes for recording and querying weather measurements.
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    db::models::weather_record::{TemperatureSummary, WeatherRecord, WeatherRecordInsert},
    services::{
        ingest,
        weather::{self, ExtremeThresholds},
    },
    state::AppState,
    utils::{httperror::HttpError, timestamp},
};

/// Create a router for routes under the weather service.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_weather))
        .route("/extremes", get(extreme_events))
        .route("/locations/{location}", get(list_records))
        .route("/locations/{location}/temperature", get(temperature_summary))
        .route("/locations/{location}/ingest", post(ingest_current))
}

/// The response to a successful POST of a new record.
#[derive(Serialize)]
struct CreatedResponse {
    /// The ID of the stored record.
    id: i32,
}

/// The response to routes returning many records.
#[derive(Serialize)]
struct ListRecordsResponse {
    records: Vec<WeatherRecord>,
}

#[derive(Serialize)]
struct IngestResponse {
    id: i32,
    record: WeatherRecordInsert,
}

#[derive(Deserialize)]
struct ListRecordsParameters {
    start_date: Option<String>,
}

#[derive(Deserialize)]
struct DateRangeParameters {
    start_date: String,
    end_date: String,
}

/// Parse a timestamp query parameter, naming the parameter on failure.
fn parse_query_timestamp(name: &str, value: &str) -> Result<PrimitiveDateTime, HttpError> {
    timestamp::parse(value).map_err(|err| {
        tracing::warn!("Rejected {name}={value:?}: {err}");
        HttpError::bad_request(format!(
            "{name} must be YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"
        ))
    })
}

/// Store a new measurement.
async fn record_weather(
    State(state): State<AppState>,
    body: Result<Json<WeatherRecordInsert>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let Json(record) = body?;
    let id = weather::record_weather(record, &state.db).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List measurements for a location, newest first.
async fn list_records(
    State(state): State<AppState>,
    Path(location): Path<String>,
    params: Result<Query<ListRecordsParameters>, QueryRejection>,
) -> Result<Json<ListRecordsResponse>, HttpError> {
    let Query(params) = params?;
    let start = params
        .start_date
        .as_deref()
        .map(|value| parse_query_timestamp("start_date", value))
        .transpose()?;
    let records = weather::records_for_location(location.trim(), start, &state.db).await?;
    Ok(Json(ListRecordsResponse { records }))
}

/// Temperature statistics for a location over a date range.
async fn temperature_summary(
    State(state): State<AppState>,
    Path(location): Path<String>,
    params: Result<Query<DateRangeParameters>, QueryRejection>,
) -> Result<Json<TemperatureSummary>, HttpError> {
    let Query(params) = params?;
    let start = parse_query_timestamp("start_date", &params.start_date)?;
    let end = parse_query_timestamp("end_date", &params.end_date)?;
    Ok(Json(
        weather::temperature_summary(location.trim(), start, end, &state.db).await?,
    ))
}

/// Records at or above the temperature or precipitation thresholds.
async fn extreme_events(
    State(state): State<AppState>,
    params: Result<Query<ExtremeThresholds>, QueryRejection>,
) -> Result<Json<ListRecordsResponse>, HttpError> {
    let Query(thresholds) = params?;
    let records = weather::extreme_events(thresholds, &state.db).await?;
    Ok(Json(ListRecordsResponse { records }))
}

/// Fetch and store the provider's current conditions for a location.
async fn ingest_current(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<(StatusCode, Json<IngestResponse>), HttpError> {
    let (id, record) = ingest::ingest_current(&state.weather_api, &location, &state.db).await?;
    Ok((StatusCode::CREATED, Json(IngestResponse { id, record })))
}

impl From<weather::errors::RecordWeatherError> for HttpError {
    fn from(err: weather::errors::RecordWeatherError) -> Self {
        match err {
            weather::errors::RecordWeatherError::DatabaseError(error) => error.into(),
            weather::errors::RecordWeatherError::Invalid(reason) => {
                tracing::warn!("Refused to store weather record: {reason}");
                Self::bad_request(reason.to_string())
            }
        }
    }
}

impl From<weather::errors::SummaryError> for HttpError {
    fn from(err: weather::errors::SummaryError) -> Self {
        match err {
            weather::errors::SummaryError::DatabaseError(error) => error.into(),
            weather::errors::SummaryError::InvalidRange { .. } => {
                tracing::warn!("{err}");
                Self::bad_request("start_date must not be after end_date")
            }
            weather::errors::SummaryError::NoRecords(_) => {
                Self::new(StatusCode::NOT_FOUND, Some(err.to_string()))
            }
        }
    }
}

impl From<weather::errors::ExtremesError> for HttpError {
    fn from(err: weather::errors::ExtremesError) -> Self {
        match err {
            weather::errors::ExtremesError::DatabaseError(error) => error.into(),
            weather::errors::ExtremesError::InvalidThreshold => Self::bad_request(err.to_string()),
        }
    }
}

impl From<ingest::errors::IngestError> for HttpError {
    fn from(err: ingest::errors::IngestError) -> Self {
        match err {
            ingest::errors::IngestError::DatabaseError(error) => error.into(),
            ingest::errors::IngestError::Disabled => {
                tracing::warn!("Ingestion requested but no weather API key is configured");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, Some(err.to_string()))
            }
            ingest::errors::IngestError::Location(reason) => Self::bad_request(reason.to_string()),
            ingest::errors::IngestError::LocationNotFound(_) => {
                tracing::warn!("{err}");
                Self::new(StatusCode::NOT_FOUND, Some(err.to_string()))
            }
            ingest::errors::IngestError::RequestFailed(_)
            | ingest::errors::IngestError::Upstream(_)
            | ingest::errors::IngestError::Malformed(_)
            | ingest::errors::IngestError::Invalid(_) => {
                tracing::error!("Weather ingestion failed: {err}");
                Self::new(StatusCode::BAD_GATEWAY, Some(err.to_string()))
            }
        }
    }
}
