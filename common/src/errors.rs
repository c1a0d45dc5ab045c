//! Application error types.
//!
//! One error enum shared by every crate in the workspace.

use thiserror::Error;

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided or default message.
        message: String,
    },

    /// The server answered with a body that is not the expected JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Transport failure talking to another service.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Database command failed.
    #[error("database error: {0}")]
    Database(String),

    /// Clipboard write was rejected.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Preference storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Returns a stable error code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Api { .. } => "API_ERROR",
            AppError::InvalidResponse(_) => "INVALID_RESPONSE",
            AppError::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Clipboard(_) => "CLIPBOARD_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
