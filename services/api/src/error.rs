//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Login with an unknown email or a wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration with an email that is already taken
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Missing or invalid session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Valid session with insufficient role
    #[error("Forbidden")]
    Forbidden,

    /// Apartment, booking, or route that did not resolve
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Malformed request payload
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Too many failed login attempts
    #[error("Too many failed login attempts")]
    TooManyAttempts,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] common::error::StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::EmailAlreadyRegistered => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::TooManyAttempts => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many failed login attempts".to_string(),
            ),
            ApiError::InternalServerError | ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
