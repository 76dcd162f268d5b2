//! Mail service trait and message type

use async_trait::async_trait;

use crate::InfrastructureError;

// Recipient masking shared with the domain layer
pub use mg_shared::utils::validation::mask_email;

/// An outgoing mail message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain text body
    pub text: String,
}

/// Common interface for all mail providers
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a message; returns a provider message id
    async fn send(&self, message: &MailMessage) -> Result<String, InfrastructureError>;

    /// Human-readable provider name
    fn provider_name(&self) -> &str;
}
