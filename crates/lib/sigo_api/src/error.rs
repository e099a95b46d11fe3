//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database unavailable: {0}")]
    DbUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::DbUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "db_unavailable", m.as_str())
            }
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::BadGateway(m) => (StatusCode::BAD_GATEWAY, "bad_gateway", m.as_str()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sigo_core::auth::AuthError> for AppError {
    fn from(e: sigo_core::auth::AuthError) -> Self {
        match e {
            sigo_core::auth::AuthError::CredentialError => {
                AppError::Unauthorized("Invalid credentials".into())
            }
            sigo_core::auth::AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            sigo_core::auth::AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<sigo_core::store::StoreError> for AppError {
    fn from(e: sigo_core::store::StoreError) -> Self {
        AppError::DbUnavailable(e.to_string())
    }
}

impl From<sigo_core::sisgpo::SisgpoError> for AppError {
    fn from(e: sigo_core::sisgpo::SisgpoError) -> Self {
        match e {
            sigo_core::sisgpo::SisgpoError::Configuration(msg) => AppError::Internal(msg),
            sigo_core::sisgpo::SisgpoError::Integration(msg) => AppError::BadGateway(msg),
            sigo_core::sisgpo::SisgpoError::Connectivity(msg) => AppError::BadGateway(msg),
            sigo_core::sisgpo::SisgpoError::Store(e) => AppError::from(e),
        }
    }
}
