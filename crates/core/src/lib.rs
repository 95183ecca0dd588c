//! Shared primitives for all Rust crates in the gazette portal.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across gazette crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
