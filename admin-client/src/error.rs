//! Client error types

use thiserror::Error;

use shared::error::{ExceptionKind, ExceptionsBody};

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (transport level)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an exceptions body
    #[error("API error ({kind:?}): {message}")]
    Api {
        kind: ExceptionKind,
        message: String,
        fields: Vec<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Build from a parsed exceptions body; the first entry wins, matching
    /// the page's "any non-empty exceptions array is failure" rule.
    pub fn from_exceptions(body: ExceptionsBody) -> Self {
        match body.exceptions.into_iter().next() {
            Some(exception) => ClientError::Api {
                kind: exception.kind,
                message: exception.message,
                fields: exception.fields,
            },
            None => ClientError::InvalidResponse("Empty exceptions body".into()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
