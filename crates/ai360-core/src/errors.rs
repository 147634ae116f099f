//! Cross-cutting error types for ai360.
//!
//! Crate-specific errors (`StoreError`, `ClientError`, `ConfigError`) live in
//! their own crates. The CLI converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any ai360 crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A view transition was attempted that the state machine does not allow.
    #[error("Invalid view transition: {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Input failed validation before any external call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not enough profile data to request a prediction.
    #[error("Insufficient user data for prediction")]
    InsufficientProfile,

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
