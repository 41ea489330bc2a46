//! Error types for lbwatch

use thiserror::Error;

/// Main error type for lbwatch
#[derive(Error, Debug)]
pub enum LbwatchError {
    /// The stats socket could not be reached (or the query timed out)
    #[error("Stats source unavailable: {0}")]
    SourceUnavailable(String),

    /// The stats socket was reachable but responded with a failure
    #[error("Stats source error: {0}")]
    SourceError(String),

    /// The stats payload was received but is structurally unusable
    #[error("Malformed stats input: {0}")]
    MalformedInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for lbwatch operations
pub type LbwatchResult<T> = Result<T, LbwatchError>;

impl LbwatchError {
    /// Stable machine-readable kind, used in API error bodies so consumers
    /// can branch without parsing message text.
    pub fn kind(&self) -> &'static str {
        match self {
            LbwatchError::SourceUnavailable(_) => "source_unavailable",
            LbwatchError::SourceError(_) => "source_error",
            LbwatchError::MalformedInput(_) => "malformed_input",
            LbwatchError::Config(_) => "config",
            LbwatchError::Io(_) => "io",
            LbwatchError::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for LbwatchError {
    fn from(err: serde_json::Error) -> Self {
        LbwatchError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for LbwatchError {
    fn from(err: toml::de::Error) -> Self {
        LbwatchError::Config(err.to_string())
    }
}
