//! Mail Service Trait Adapter
//!
//! This module provides an adapter that implements the core
//! MailServiceTrait for any infrastructure mail service, bridging the
//! transport implementation with the core domain trait.

use async_trait::async_trait;
use mg_core::services::gate::MailServiceTrait;

use crate::mail::mail_service::{MailMessage, MailService};

/// Adapter that implements the core MailServiceTrait
pub struct MailServiceAdapter {
    inner: Box<dyn MailService>,
}

impl MailServiceAdapter {
    /// Create a new adapter around a mail service
    pub fn new(inner: Box<dyn MailService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MailServiceTrait for MailServiceAdapter {
    async fn send_verification_code(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, String> {
        let message = MailMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            text: body.to_string(),
        };
        self.inner.send(&message).await.map_err(|e| e.to_string())
    }
}
