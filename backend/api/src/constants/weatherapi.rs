//! Constants for the upstream weather data provider.
use super::secrets::env_or_secret;
use std::{env::var, sync::LazyLock};

/// The key used to authenticate against the weather API. Ingestion from the
/// provider is disabled when this is not set.
pub static API_KEY: LazyLock<Option<String>> = LazyLock::new(|| env_or_secret("API_KEY"));

/// Base URL of the weather API, without a trailing slash.
pub static API_URL: LazyLock<String> = LazyLock::new(|| {
    var("API_URL")
        .unwrap_or_else(|_| String::from("https://api.weatherapi.com/v1"))
        .trim_end_matches('/')
        .to_owned()
});

/// Timeout for a single request to the weather API, in seconds.
pub const API_TIMEOUT: u64 = 10;
