// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to one HTTP status code and error code.
/// NotFound and Forbidden are deliberately distinct: NotFound means the row
/// does not exist for the caller, Forbidden means it exists but belongs to
/// another user's destination.
#[derive(Error, Debug)]
pub enum WishlistError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Internal server error")]
    InternalError,
}

impl WishlistError {
    /// Stable machine-readable code used in the JSON error body
    pub fn code(&self) -> &'static str {
        match self {
            WishlistError::NotFound(_) => "NOT_FOUND",
            WishlistError::Forbidden(_) => "FORBIDDEN",
            WishlistError::Conflict(_) => "CONFLICT",
            WishlistError::DatabaseError(_) => "DATABASE_ERROR",
            WishlistError::InvalidInput(_) => "INVALID_INPUT",
            WishlistError::ValidationError(_) => "VALIDATION_ERROR",
            WishlistError::Unauthorized(_) => "UNAUTHORIZED",
            WishlistError::StorageError(_) => "STORAGE_ERROR",
            WishlistError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            WishlistError::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for WishlistError {
    fn from(errors: validator::ValidationErrors) -> Self {
        WishlistError::ValidationError(errors.to_string())
    }
}

/// Convert WishlistError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for WishlistError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            WishlistError::NotFound(_) => StatusCode::NOT_FOUND,
            WishlistError::Forbidden(_) => StatusCode::FORBIDDEN,
            WishlistError::Conflict(_) => StatusCode::CONFLICT,
            WishlistError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WishlistError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            WishlistError::ValidationError(_) => StatusCode::BAD_REQUEST,
            WishlistError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            WishlistError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WishlistError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            WishlistError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
