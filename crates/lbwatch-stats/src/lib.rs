//! Stats acquisition and parsing for lbwatch
//!
//! [`StatsSource`] fetches one raw stats table from the load balancer's
//! admin socket (or a saved dump); [`parse_stats`] decodes it into typed
//! server records.

pub mod parser;
pub mod source;

pub use parser::parse_stats;
pub use source::{FileSource, SocketSource, StatsSource};
