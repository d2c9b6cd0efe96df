use thiserror::Error;

/// Standard error type for the Portico core.
#[derive(Debug, Error)]
pub enum PorticoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Single undifferentiated authentication failure. Callers can never
    /// tell whether the username or the secret was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage-medium fault (quota exceeded, unwritable directory, ...).
    /// Write failures are always reported, never swallowed.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PorticoError {
    /// Get the error code string for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            PorticoError::NotFound(_) => "NOT_FOUND",
            PorticoError::InvalidCredentials => "INVALID_CREDENTIALS",
            PorticoError::Conflict(_) => "CONFLICT",
            PorticoError::Validation(_) => "VALIDATION_ERROR",
            PorticoError::Storage(_) => "STORAGE_ERROR",
            PorticoError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
