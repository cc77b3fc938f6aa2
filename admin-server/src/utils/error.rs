//! Unified error handling.
//!
//! Every failing endpoint answers with the exceptions body:
//!
//! ```json
//! { "exceptions": [ { "kind": "validation-error", "message": "...", "fields": ["email"] } ] }
//! ```
//!
//! | Kind | Status |
//! |------|--------|
//! | bad-argument, validation-error | 400 |
//! | not-found, unknown-field | 404 |
//! | persistence-failure, renderer-failure, internal | 500 |
//!
//! Mailer failure is non-fatal and never becomes an error response; the
//! create-invoice reply reports it as `email_sent: false`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::db::repository::RepoError;
use shared::error::{ExceptionKind, ExceptionsBody};

/// Application error, mapped onto the wire-level exception kinds.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller supplied the wrong type (400).
    #[error("Bad argument: {0}")]
    BadArgument(String),

    /// Domain rule violated; names the offending fields (400).
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<String>,
    },

    /// Referenced id absent (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Field name not present on the entity (404).
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Store write failed (500).
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Invoice artifact could not be produced (500).
    #[error("Renderer failure: {0}")]
    Renderer(String),

    /// Everything else (500).
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument(message.into())
    }

    pub fn validation(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn kind(&self) -> ExceptionKind {
        match self {
            AppError::BadArgument(_) => ExceptionKind::BadArgument,
            AppError::Validation { .. } => ExceptionKind::ValidationError,
            AppError::NotFound(_) => ExceptionKind::NotFound,
            AppError::UnknownField(_) => ExceptionKind::UnknownField,
            AppError::Persistence(_) => ExceptionKind::PersistenceFailure,
            AppError::Renderer(_) => ExceptionKind::RendererFailure,
            AppError::Internal(_) => ExceptionKind::Internal,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadArgument(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::UnknownField(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) | AppError::Renderer(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = match &self {
            AppError::Validation { message, fields } => {
                ExceptionsBody::validation(message.clone(), fields.clone())
            }
            other => ExceptionsBody::single(other.kind(), other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::UnknownField(msg) => AppError::UnknownField(msg),
            RepoError::Persistence(msg) => AppError::Persistence(msg),
            RepoError::Database(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type for request handlers
pub type AppResult<T> = Result<T, AppError>;
