//! Error types for the stub API

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias using the stub ApiError
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors a stub API operation can produce
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("{0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{kind} {id} is not pending")]
    NotPending { kind: String, id: String },
}

impl ApiError {
    /// HTTP status this error is served as
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotPending { .. } => StatusCode::CONFLICT,
        }
    }
}
