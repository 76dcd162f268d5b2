//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for MailGate. It
//! provides concrete implementations of the gate's external
//! collaborators:
//!
//! - **Mail**: transports that deliver verification codes (mock console
//!   transport for development, Brevo HTTP API for production)
//! - **Platform**: decision sinks that resolve join requests (mock sink,
//!   OneBot HTTP API)
//!
//! Trait adapters bridge these services to the `mg_core` gate traits.

use thiserror::Error;

/// Mail transport module - external mail providers
pub mod mail;

/// Platform module - join-request decision delivery
pub mod platform;

/// Infrastructure-level errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mail transport error: {0}")]
    Mail(String),

    #[error("Platform error: {0}")]
    Platform(String),
}
