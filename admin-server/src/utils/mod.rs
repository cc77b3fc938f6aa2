//! Utility module - errors, validation, logging.

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult};
