//! Database connection related constants.
use super::secrets::env_or_secret;
use sqlx::postgres::PgConnectOptions;
use std::{env::var, sync::LazyLock};

/// The hostname where the PostgreSQL server can be found.
pub static DB_HOST: LazyLock<String> =
    LazyLock::new(|| var("DB_HOST").unwrap_or_else(|_| String::from("localhost")));

/// The port the PostgreSQL server listens on.
pub static DB_PORT: LazyLock<u16> = LazyLock::new(|| {
    var("DB_PORT").map_or(5432, |port| {
        port.parse().expect("DB_PORT is not a valid port number")
    })
});

pub static DB_USER: LazyLock<String> = LazyLock::new(|| {
    var("DB_USER").expect("DB_USER not provided in environment variables")
});

pub static DB_NAME: LazyLock<String> =
    LazyLock::new(|| var("DB_NAME").unwrap_or_else(|_| String::from("medclimate")));

pub static DB_PASSWORD: LazyLock<String> = LazyLock::new(|| {
    env_or_secret("DB_PASSWORD").expect(
        "Neither DB_PASSWORD nor DB_PASSWORD_DOCKER_SECRET provided in environment variables",
    )
});

/// Connection options for the configured database.
pub static DB_CONNECT_OPTIONS: LazyLock<PgConnectOptions> = LazyLock::new(|| {
    connect_options(&DB_USER, &DB_PASSWORD, &DB_HOST, *DB_PORT, &DB_NAME)
});

/// Build PostgreSQL connection options from their parts. Values are passed
/// through as-is, so credentials may contain URL-reserved characters.
pub fn connect_options(
    user: &str,
    password: &str,
    host: &str,
    port: u16,
    database: &str,
) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(host)
        .port(port)
        .username(user)
        .password(password)
        .database(database)
}
