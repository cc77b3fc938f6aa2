//! Repository Module
//!
//! CRUD operations over the SQLite tables. Repositories are free functions
//! taking a [`sqlx::SqlitePool`] reference; handlers translate [`RepoError`]
//! into wire-level exceptions.

pub mod appointment;
pub mod customer;
pub mod invoice;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
