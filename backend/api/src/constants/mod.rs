//! Constants (primary environment variables/secrets) used across the application.
//!
//! Values are read lazily from the process environment. A `.env` file in the
//! working directory is loaded into the environment before any of these are
//! first accessed (see `main`).
pub mod api;
pub mod db;
mod secrets;
pub mod weatherapi;
