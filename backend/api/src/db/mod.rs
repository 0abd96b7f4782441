//! Contains database models and interaction code.
pub mod models;
use crate::constants::db as constants;

/// An alias for the underlying DBMS specific pool type.
pub type ConnectionPool = sqlx::PgPool;

/// DDL run at startup. Every statement is idempotent.
const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS weather_records (
    id SERIAL PRIMARY KEY,
    timestamp TIMESTAMP NOT NULL,
    temperature FLOAT,
    humidity FLOAT,
    precipitation FLOAT,
    location VARCHAR(100),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_weather_location_timestamp
ON weather_records(location, timestamp);
";

/// Initiate a pooled connection to the database.
pub async fn connect() -> Result<ConnectionPool, errors::DatabaseError> {
    Ok(sqlx::PgPool::connect_with(constants::DB_CONNECT_OPTIONS.clone()).await?)
}

/// Create the tables and indexes the application relies on, if they do not
/// already exist.
pub async fn init_schema(db_client: &ConnectionPool) -> Result<(), errors::DatabaseError> {
    sqlx::raw_sql(SCHEMA).execute(db_client).await?;
    Ok(())
}

pub mod errors {
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error(transparent)]
    pub struct DatabaseError(#[from] sqlx::Error);
}

/// A throwaway PostgreSQL server for database-backed tests.
#[cfg(all(test, feature = "pg"))]
pub mod testing {
    use std::time::Duration;

    use testcontainers::{runners::AsyncRunner, ContainerAsync};
    use testcontainers_modules::postgres::Postgres;

    use super::ConnectionPool;

    /// A running container with an initialised schema. The container stops
    /// when this is dropped, so keep it alive for the whole test.
    pub struct DbUnderTest {
        pub pool: ConnectionPool,
        _container: ContainerAsync<Postgres>,
    }

    /// Start PostgreSQL, connect to it and create the schema.
    pub async fn bring_up_postgres() -> DbUnderTest {
        let container = Postgres::default()
            .with_user("climate")
            .with_password("pa#ss/w?rd")
            .with_db_name("medclimate")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("PostgreSQL container exposes no port");
        let host = container
            .get_host()
            .await
            .expect("PostgreSQL container has no host")
            .to_string();
        let options = crate::constants::db::connect_options(
            "climate",
            "pa#ss/w?rd",
            &host,
            port,
            "medclimate",
        );

        let mut attempts = 0;
        let pool = loop {
            match sqlx::PgPool::connect_with(options.clone()).await {
                Ok(pool) => break pool,
                Err(err) if attempts < 50 => {
                    attempts += 1;
                    tracing::debug!("PostgreSQL not ready yet: {err}");
                    tokio::time::sleep(Duration::from_millis(200)).await;
                }
                Err(err) => panic!("Failed to connect to PostgreSQL container: {err}"),
            }
        };
        super::init_schema(&pool)
            .await
            .expect("Failed to create the database schema");
        DbUnderTest {
            pool,
            _container: container,
        }
    }
}
