//! Recording and querying weather measurements.
use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::db::{
    self,
    models::weather_record::{TemperatureSummary, WeatherRecord, WeatherRecordInsert},
};

/// Temperature at or above which a record counts as extreme, in Celsius.
pub const DEFAULT_TEMPERATURE_THRESHOLD: f64 = 35.0;
/// Precipitation at or above which a record counts as extreme, in millimetres.
pub const DEFAULT_PRECIPITATION_THRESHOLD: f64 = 50.0;

/// Thresholds for extreme weather events. Missing values fall back to the
/// defaults.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ExtremeThresholds {
    #[serde(default = "default_temperature_threshold")]
    pub temperature: f64,
    #[serde(default = "default_precipitation_threshold")]
    pub precipitation: f64,
}

const fn default_temperature_threshold() -> f64 {
    DEFAULT_TEMPERATURE_THRESHOLD
}

const fn default_precipitation_threshold() -> f64 {
    DEFAULT_PRECIPITATION_THRESHOLD
}

impl Default for ExtremeThresholds {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_THRESHOLD,
            precipitation: DEFAULT_PRECIPITATION_THRESHOLD,
        }
    }
}

/// Validate and store a new measurement, returning its ID.
pub async fn record_weather(
    record: WeatherRecordInsert,
    db_conn: &db::ConnectionPool,
) -> Result<i32, errors::RecordWeatherError> {
    let record = record.validate()?;
    let id = record.store(db_conn).await?;
    tracing::info!("Stored weather record {id} for {}", record.location);
    Ok(id)
}

/// All measurements for a location, newest first.
pub async fn records_for_location(
    location: &str,
    start: Option<PrimitiveDateTime>,
    db_conn: &db::ConnectionPool,
) -> Result<Vec<WeatherRecord>, db::errors::DatabaseError> {
    WeatherRecord::select_by_location(location, start, db_conn).await
}

/// Temperature statistics for a location over an inclusive range.
pub async fn temperature_summary(
    location: &str,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    db_conn: &db::ConnectionPool,
) -> Result<TemperatureSummary, errors::SummaryError> {
    check_range(start, end)?;
    TemperatureSummary::select(location, start, end, db_conn)
        .await?
        .ok_or_else(|| errors::SummaryError::NoRecords(location.to_owned()))
}

/// Measurements at or above either threshold, newest first.
pub async fn extreme_events(
    thresholds: ExtremeThresholds,
    db_conn: &db::ConnectionPool,
) -> Result<Vec<WeatherRecord>, errors::ExtremesError> {
    check_thresholds(thresholds)?;
    Ok(WeatherRecord::select_extremes(thresholds.temperature, thresholds.precipitation, db_conn)
        .await?)
}

/// Refuse a range whose start lies after its end.
pub fn check_range(
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> Result<(), errors::SummaryError> {
    if start > end {
        return Err(errors::SummaryError::InvalidRange { start, end });
    }
    Ok(())
}

/// Refuse thresholds which could never compare against a stored value.
pub fn check_thresholds(thresholds: ExtremeThresholds) -> Result<(), errors::ExtremesError> {
    if !thresholds.temperature.is_finite() || !thresholds.precipitation.is_finite() {
        return Err(errors::ExtremesError::InvalidThreshold);
    }
    Ok(())
}

pub mod errors {
    use crate::db::{errors::DatabaseError, models::weather_record::InvalidRecord};
    use thiserror::Error;
    use time::PrimitiveDateTime;

    #[derive(Error, Debug)]
    pub enum RecordWeatherError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error(transparent)]
        Invalid(#[from] InvalidRecord),
    }
    #[derive(Error, Debug)]
    pub enum SummaryError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("Range start {start} is after its end {end}")]
        InvalidRange {
            start: PrimitiveDateTime,
            end: PrimitiveDateTime,
        },
        #[error("No weather records for {0} in the requested range")]
        NoRecords(String),
    }
    #[derive(Error, Debug)]
    pub enum ExtremesError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("Thresholds must be finite numbers")]
        InvalidThreshold,
    }
}
