//! Mock mail service for development
//!
//! Logs outgoing messages instead of delivering them, and records them
//! so callers can inspect what would have been sent.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::mail::mail_service::{mask_email, MailMessage, MailService};
use crate::InfrastructureError;

/// Mail service that records messages instead of delivering them
#[derive(Default)]
pub struct MockMailService {
    sent: Mutex<Vec<MailMessage>>,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far
    pub fn sent_messages(&self) -> Vec<MailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send(&self, message: &MailMessage) -> Result<String, InfrastructureError> {
        let mut sent = self
            .sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sent.push(message.clone());

        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            "Mock mail service: message recorded instead of sent"
        );
        Ok(format!("mock-mail-{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
