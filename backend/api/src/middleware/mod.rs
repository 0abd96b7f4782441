//! Tower layers applied around every route.
pub mod cors;
