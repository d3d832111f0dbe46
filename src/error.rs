//! Error types for Atheneum server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("A reader with this id card already exists")]
    DuplicateIdCard,

    #[error("Reader still holds unreturned books")]
    ReaderHasOpenLoans,

    #[error("No copies of this book are available")]
    NoCopiesAvailable,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    /// Stable machine-readable tag for the error taxonomy
    fn tag(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "not_authenticated",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::DuplicateUsername => "duplicate_username",
            AppError::DuplicateIdCard => "duplicate_id_card",
            AppError::ReaderHasOpenLoans => "reader_has_open_loans",
            AppError::NoCopiesAvailable => "no_copies_available",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Authentication(_) | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateUsername | AppError::DuplicateIdCard => StatusCode::CONFLICT,
            AppError::ReaderHasOpenLoans | AppError::NoCopiesAvailable => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Storage faults are logged above; the body never leaks them.
        let message = match &self {
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: self.tag().to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
