//! # AppError
//!
//! Centralized error handling for the Rusty-Forum core.
//! The taxonomy is deliberately small: every failure a caller can act on
//! maps onto one of these variants.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all forum-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Thread, Reply)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, Uuid),

    /// The requesting identity may not mutate the matched resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Domain bound violated (e.g., title too long, too many tags)
    #[error("validation error: {0}")]
    Validation(String),

    /// Infrastructure failure surfaced through a port (e.g., store down)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for forum-core logic.
pub type Result<T> = std::result::Result<T, AppError>;
