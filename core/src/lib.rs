//! # MailGate Core
//!
//! Core business logic and domain layer for the MailGate verification gate.
//! This crate contains the verification session entity, the gate services
//! (session store, request coordination, suffix policy), collaborator
//! traits, and error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
