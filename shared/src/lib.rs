//! Shared utilities and common types for MailGate
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types
//! - Environment detection and logging configuration
//! - Utility functions (email validation, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig,
    GateConfig, MailConfig, PlatformConfig,
};
pub use utils::validation;
