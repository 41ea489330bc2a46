//! Snapshot aggregation for lbwatch
//!
//! [`StatusMonitor`] drives the whole pipeline: fetch raw stats, parse
//! into records, classify by name, fold into summary counters, and emit
//! one immutable [`lbwatch_core::StatusSnapshot`] per call.

mod snapshot;

pub use snapshot::StatusMonitor;
