//! Error types for the edges of the game (configuration and stored preferences)
//!
//! The simulation core itself is total over valid inputs and never fails.

use thiserror::Error;

/// Invalid simulation tunables
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tile count must be between 2 and {max}, got {got}")]
    TileCount { got: i32, max: i32 },
    #[error("base tick interval must be a positive number of milliseconds, got {0}")]
    TickInterval(f64),
}

/// Failure reading or writing a persisted preference
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("stored value for `{key}` is malformed: {source}")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown value `{value}` for `{key}`")]
    UnknownValue { key: &'static str, value: String },
    #[error("failed to write `{key}`")]
    Write { key: &'static str },
}
