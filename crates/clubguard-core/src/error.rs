//! Error types for clubguard-core

use thiserror::Error;

/// Result type alias using clubguard-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in clubguard-core operations
///
/// Route access checks never fail; data conflicts are reported through
/// [`crate::ConflictResolution::conflicts`] and are never errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown conflict resolution strategy name
    #[error("Unknown conflict resolution strategy: {0}")]
    InvalidStrategy(String),

    /// Unknown role name
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Route pattern is empty or not rooted at `/`
    #[error("Invalid route pattern: {0:?}")]
    InvalidRoutePattern(String),

    /// Route configuration could not be parsed or validated
    #[error("Invalid route configuration: {0}")]
    InvalidConfig(String),

    /// Value does not serialize to a JSON object
    #[error("Expected a record (JSON object), got {0}")]
    NotARecord(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
