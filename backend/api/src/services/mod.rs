//! Controllers which correspond to routes and define core business logic.
pub mod ingest;
pub mod weather;
