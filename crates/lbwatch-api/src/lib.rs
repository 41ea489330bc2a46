//! REST API for lbwatch
//!
//! Thin JSON exposition of the snapshot pipeline; all decision logic
//! lives in the monitor crate.

mod rest;

pub use rest::{create_router, AppState, ErrorBody, HealthResponse};
