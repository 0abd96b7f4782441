//! Constants related to the general configuration of the entire API and its deployment.

use std::{env::var, sync::LazyLock};

/// A prefix to prepend to any API paths to make them externally accessible.
pub static API_URI_PREFIX: LazyLock<String> =
    LazyLock::new(|| var("API_URI_PREFIX").unwrap_or(String::from("/")));

/// The interface the HTTP listener binds to.
pub static API_HOST: LazyLock<String> =
    LazyLock::new(|| var("API_HOST").unwrap_or_else(|_| String::from("0.0.0.0")));

/// The port the HTTP listener binds to.
pub static API_PORT: LazyLock<u16> = LazyLock::new(|| {
    var("API_PORT").map_or(8000, |port| {
        port.parse().expect("API_PORT is not a valid port number")
    })
});

/// Title reported by the service.
pub const API_TITLE: &str = "MedClimate API";
/// Version reported by the service.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
