//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use thiserror::Error;

/// Custom error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record matched the requested id or key
    #[error("record not found")]
    NotFound,

    /// A record with the same unique key already exists
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Unexpected storage failure
    #[error("storage error: {0}")]
    Internal(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
