//! Common error types for the influencer verifier

use thiserror::Error;

/// Common result type for influencer verifier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the influencer verifier crates
#[derive(Error, Debug)]
pub enum Error {
    /// Store read or write failure (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error, including a missing oracle key
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input (empty name, no claims, no journals)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Oracle unreachable or returned unusable content
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
