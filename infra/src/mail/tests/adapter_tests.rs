//! Tests for the mail service trait adapter

use async_trait::async_trait;
use mg_core::services::gate::MailServiceTrait;

use crate::mail::mail_service::{MailMessage, MailService};
use crate::mail::mail_trait_adapter::MailServiceAdapter;
use crate::InfrastructureError;

struct FailingMailService;

#[async_trait]
impl MailService for FailingMailService {
    async fn send(&self, _message: &MailMessage) -> Result<String, InfrastructureError> {
        Err(InfrastructureError::Mail("connection refused".to_string()))
    }

    fn provider_name(&self) -> &str {
        "Failing"
    }
}

struct EchoMailService;

#[async_trait]
impl MailService for EchoMailService {
    async fn send(&self, message: &MailMessage) -> Result<String, InfrastructureError> {
        Ok(format!("echo-{}", message.to))
    }

    fn provider_name(&self) -> &str {
        "Echo"
    }
}

#[tokio::test]
async fn test_adapter_forwards_send() {
    let adapter = MailServiceAdapter::new(Box::new(EchoMailService));

    let id = adapter
        .send_verification_code("alice@example.com", "Subject", "Body")
        .await
        .unwrap();
    assert_eq!(id, "echo-alice@example.com");
}

#[tokio::test]
async fn test_adapter_maps_errors_to_strings() {
    let adapter = MailServiceAdapter::new(Box::new(FailingMailService));

    let err = adapter
        .send_verification_code("alice@example.com", "Subject", "Body")
        .await
        .unwrap_err();
    assert!(err.contains("connection refused"));
}
