//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Primary entity mutations fail the whole request with one of these;
/// secondary effects (audit logging, notifications) are caught at the call
/// site and never surface through this taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not valid for the entity's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Duplicate unique value.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database call failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Identity-provider call failed.
    #[error("Auth provider error: {0}")]
    AuthProvider(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    ///
    /// Invalid-state failures surface as 400 rather than 409: the original
    /// interface reported a non-pending approval as a bad request.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidState(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::AuthProvider(_) | Self::ExternalService(_) | Self::Internal(_) => {
                500
            }
        }
    }

    /// Returns the machine-readable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::Conflict(_) => "conflict",
            Self::Database(_) => "database_error",
            Self::AuthProvider(_) => "auth_provider_error",
            Self::ExternalService(_) => "external_service_error",
            Self::Internal(_) => "internal_error",
        }
    }
}
