//! Mail Transport Module
//!
//! This module provides mail service implementations for delivering
//! verification codes.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all mail providers
//! - **Mock Implementation**: Log output for development
//! - **Brevo Support**: Production delivery via the Brevo HTTP API
//! - **Security**: Recipient addresses masked in logs

pub mod mail_service;
pub mod mock_mail;

pub mod brevo;

pub mod mail_trait_adapter;

// Re-export commonly used types
pub use mail_service::{MailMessage, MailService};
pub use mock_mail::MockMailService;

pub use brevo::{BrevoConfig, BrevoMailService};

pub use mail_trait_adapter::MailServiceAdapter;

#[cfg(test)]
mod tests;

/// Create a mail service based on configuration
///
/// Returns the provider named in the configuration, falling back to the
/// mock transport when the provider is unknown or fails to initialize.
pub fn create_mail_service(config: &mg_shared::config::MailConfig) -> Box<dyn MailService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockMailService::new()),
        "brevo" => {
            let brevo_config = BrevoConfig {
                api_key: config.api_key.clone(),
                from_email: config.from_email.clone(),
                from_name: config.from_name.clone(),
                ..BrevoConfig::default()
            };

            match BrevoMailService::new(brevo_config) {
                Ok(service) => Box::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize Brevo mail service: {}", e);
                    tracing::warn!("Falling back to mock mail service");
                    Box::new(MockMailService::new())
                }
            }
        }
        other => {
            tracing::warn!("Unknown mail provider '{}', using mock mail service", other);
            Box::new(MockMailService::new())
        }
    }
}
