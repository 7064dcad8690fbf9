//! Unified error handling
//!
//! [`AppError`] is the application error enum; its `IntoResponse` impl maps
//! every variant onto the wire taxonomy:
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | Validation | 400 | raw `{field: message, ...}` map |
//! | Upload | 400 | `{"image": message}` |
//! | Unauthorized / TokenExpired / InvalidToken | 401 | `{"message": ...}` |
//! | Forbidden | 403 | `{"message": ...}` |
//! | NotFound | 404 | `{"message": ...}` |
//! | Conflict | 409 | `{"message": ...}` |
//! | Internal | 500 | `{"error": ..., "detail"?}` |
//!
//! The 500 `detail` field carries the underlying message only in
//! development; [`set_expose_internal_detail`] records that choice from the
//! loaded configuration at startup.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Field name -> human readable message, collected by the validator.
/// BTreeMap keeps serialization order deterministic.
pub type FieldErrors = BTreeMap<String, String>;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    // ========== Authorization errors (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business errors (4xx) ==========
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    Upload(String),

    // ========== System errors (500) ==========
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Serialize)]
struct InternalBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

static EXPOSE_INTERNAL_DETAIL: OnceLock<bool> = OnceLock::new();

/// Record whether 500 bodies carry the underlying message. Called once at
/// startup from the loaded configuration; later calls are ignored.
pub fn set_expose_internal_detail(expose: bool) {
    let _ = EXPOSE_INTERNAL_DETAIL.set(expose);
}

/// Diagnostic detail on 500s is only exposed in development; before the
/// configuration is recorded this follows the build profile.
fn expose_internal_detail() -> bool {
    *EXPOSE_INTERNAL_DETAIL
        .get()
        .unwrap_or(&cfg!(debug_assertions))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }

            AppError::Upload(message) => {
                let mut body = FieldErrors::new();
                body.insert("image".to_string(), message);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }

            AppError::Unauthorized
            | AppError::TokenExpired
            | AppError::InvalidToken
            | AppError::InvalidCredentials => {
                let body = MessageBody {
                    message: self.to_string(),
                };
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            }

            AppError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                Json(MessageBody { message }),
            )
                .into_response(),

            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(MessageBody { message }),
            )
                .into_response(),

            AppError::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(MessageBody { message }),
            )
                .into_response(),

            AppError::Internal(detail) => {
                error!(error = %detail, "Internal server error");
                let body = InternalBody {
                    error: "An unexpected error occurred".to_string(),
                    detail: expose_internal_detail().then_some(detail),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        tracing::warn!(error = %e, "Multipart decode failed");
        AppError::Upload("Error uploading file".to_string())
    }
}

// ========== Helper constructors ==========

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload(message.into())
    }

    /// Single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), message.into());
        Self::Validation(fields)
    }

    /// Unified credentials error; prevents email enumeration on login
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }
}

/// Result alias for handlers
pub type AppResult<T> = Result<T, AppError>;
