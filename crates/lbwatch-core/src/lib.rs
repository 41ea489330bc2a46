//! Core types for lbwatch
//!
//! Shared data model, error taxonomy, and configuration used by the
//! stats source, parser, classifier, and monitor crates.

pub mod config;
pub mod error;
pub mod server;
pub mod snapshot;

pub use config::*;
pub use error::*;
pub use server::*;
pub use snapshot::*;
