//! Models mapping to the `weather_records` database table. Represents a single
//! weather measurement taken at a location.
use serde::{Deserialize, Serialize};
use sqlx::{query_as, query_scalar, FromRow};
use time::PrimitiveDateTime;

use crate::db::{errors::DatabaseError, ConnectionPool};

/// Maximum length of a location name, matching the column definition.
pub const LOCATION_MAX_LENGTH: usize = 100;

/// INSERT model for a `WeatherRecord`. Used ONLY when storing a new measurement.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct WeatherRecordInsert {
    /// When the measurement was taken.
    #[serde(with = "crate::utils::timestamp")]
    pub timestamp: PrimitiveDateTime,
    /// Temperature in degrees Celsius.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Relative humidity as a percentage.
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Precipitation in millimetres.
    #[serde(default)]
    pub precipitation: Option<f64>,
    /// Name of the location the measurement was taken at.
    pub location: String,
}

/// A `WeatherRecord` which is stored in the database. Can only be constructed
/// by reading it from the database.
#[derive(FromRow, Serialize, Debug)]
pub struct WeatherRecord {
    /// The record's ID primary key.
    id: i32,
    /// When the measurement was taken.
    #[serde(with = "crate::utils::timestamp")]
    pub timestamp: PrimitiveDateTime,
    /// Temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity as a percentage.
    pub humidity: Option<f64>,
    /// Precipitation in millimetres.
    pub precipitation: Option<f64>,
    /// Name of the location the measurement was taken at.
    pub location: Option<String>,
    /// When the row was written.
    #[serde(with = "crate::utils::timestamp::option")]
    created_at: Option<PrimitiveDateTime>,
}

/// Temperature statistics over a set of records for one location.
#[derive(FromRow, Serialize, Debug)]
pub struct TemperatureSummary {
    pub location: String,
    pub avg_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub total_records: i64,
}

/// Reasons a measurement is refused before it reaches the database.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InvalidRecord {
    #[error("Location must not be blank")]
    BlankLocation,
    #[error("Location must be at most 100 characters")]
    LocationTooLong,
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("Humidity must be between 0 and 100 percent")]
    HumidityOutOfRange,
    #[error("Precipitation must not be negative")]
    NegativePrecipitation,
}

/// Check a location name fits the column, returning it without surrounding
/// whitespace.
pub fn validate_location(location: &str) -> Result<&str, InvalidRecord> {
    let location = location.trim();
    if location.is_empty() {
        return Err(InvalidRecord::BlankLocation);
    }
    if location.chars().count() > LOCATION_MAX_LENGTH {
        return Err(InvalidRecord::LocationTooLong);
    }
    Ok(location)
}

impl WeatherRecordInsert {
    /// Check the measurement is storable and physically plausible. Also trims
    /// surrounding whitespace from the location.
    pub fn validate(mut self) -> Result<Self, InvalidRecord> {
        self.location = validate_location(&self.location)?.to_owned();
        for (name, value) in [
            ("Temperature", self.temperature),
            ("Humidity", self.humidity),
            ("Precipitation", self.precipitation),
        ] {
            if value.is_some_and(|value| !value.is_finite()) {
                return Err(InvalidRecord::NotFinite(name));
            }
        }
        if self
            .humidity
            .is_some_and(|humidity| !(0.0..=100.0).contains(&humidity))
        {
            return Err(InvalidRecord::HumidityOutOfRange);
        }
        if self.precipitation.is_some_and(|precipitation| precipitation < 0.0) {
            return Err(InvalidRecord::NegativePrecipitation);
        }
        Ok(self)
    }

    /// Store this INSERT model in the database and return the new record's ID.
    pub async fn store(&self, db_client: &ConnectionPool) -> Result<i32, DatabaseError> {
        Ok(query_scalar::<_, i32>(
            "INSERT INTO weather_records (timestamp, temperature, humidity, precipitation, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id",
        )
        .bind(self.timestamp)
        .bind(self.temperature)
        .bind(self.humidity)
        .bind(self.precipitation)
        .bind(&self.location)
        .fetch_one(db_client)
        .await?)
    }
}

impl WeatherRecord {
    /// Select all records for a location, newest first, optionally only those
    /// taken at or after `start`.
    pub async fn select_by_location(
        location: &str,
        start: Option<PrimitiveDateTime>,
        db_client: &ConnectionPool,
    ) -> Result<Vec<Self>, DatabaseError> {
        Ok(query_as::<_, Self>(
            "SELECT id, timestamp, temperature, humidity, precipitation, location, created_at
            FROM weather_records
            WHERE location = $1 AND ($2::timestamp IS NULL OR timestamp >= $2)
            ORDER BY timestamp DESC",
        )
        .bind(location)
        .bind(start)
        .fetch_all(db_client)
        .await?)
    }

    /// Select every record at or above either threshold, newest first.
    pub async fn select_extremes(
        temperature_threshold: f64,
        precipitation_threshold: f64,
        db_client: &ConnectionPool,
    ) -> Result<Vec<Self>, DatabaseError> {
        Ok(query_as::<_, Self>(
            "SELECT id, timestamp, temperature, humidity, precipitation, location, created_at
            FROM weather_records
            WHERE temperature >= $1 OR precipitation >= $2
            ORDER BY timestamp DESC",
        )
        .bind(temperature_threshold)
        .bind(precipitation_threshold)
        .fetch_all(db_client)
        .await?)
    }
}

impl TemperatureSummary {
    /// Aggregate temperatures for a location between two instants, inclusive.
    /// Returns `None` if no record falls in the range.
    pub async fn select(
        location: &str,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        db_client: &ConnectionPool,
    ) -> Result<Option<Self>, DatabaseError> {
        Ok(query_as::<_, Self>(
            "SELECT
                location,
                AVG(temperature) AS avg_temp,
                MIN(temperature) AS min_temp,
                MAX(temperature) AS max_temp,
                COUNT(*) AS total_records
            FROM weather_records
            WHERE location = $1
            AND timestamp BETWEEN $2 AND $3
            GROUP BY location",
        )
        .bind(location)
        .bind(start)
        .bind(end)
        .fetch_optional(db_client)
        .await?)
    }
}
