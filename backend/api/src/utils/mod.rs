//! Small helpers shared by routes and services.
pub mod httperror;
pub mod logging;
pub mod timestamp;
