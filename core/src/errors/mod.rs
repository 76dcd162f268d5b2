//! Domain-specific error types and error handling.

mod types;

// Re-export gate error types
pub use types::GateError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to gate-specific error types
    #[error(transparent)]
    Gate(#[from] GateError),
}

pub type DomainResult<T> = Result<T, DomainError>;
