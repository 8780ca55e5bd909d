//! Error types for the fitplan_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A preference field is missing, malformed or out of range
    #[error("Invalid `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The owner already holds the maximum number of saved workouts
    #[error("Saved workout limit of {limit} reached")]
    CapacityReached { limit: usize },

    /// No saved workout with this id belongs to the caller
    #[error("Saved workout {0} not found")]
    NotFound(Uuid),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
