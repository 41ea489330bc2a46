//! Name-pattern classification for lbwatch
//!
//! Derives a service type and a geographic origin from a server's declared
//! name using ordered substring rules. Pure functions, safe to call
//! concurrently.

mod rules;

pub use rules::{classify_location, classify_type};
