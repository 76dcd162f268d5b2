//! Brevo Mail Service Implementation
//!
//! This module provides mail delivery through the Brevo transactional
//! email HTTP API. It implements the MailService trait for production
//! delivery.
//!
//! ## Features
//!
//! - Automatic retry logic with exponential backoff
//! - Request timeout handling
//! - Recipient masking in logs

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::mail::mail_service::{mask_email, MailMessage, MailService};
use crate::InfrastructureError;

/// Brevo transactional email endpoint
const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Brevo mail service configuration
#[derive(Debug, Clone)]
pub struct BrevoConfig {
    /// Brevo API key
    pub api_key: String,
    /// Sender address
    pub from_email: String,
    /// Sender display name
    pub from_name: Option<String>,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for BrevoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from_email: String::new(),
            from_name: None,
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl BrevoConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_key = std::env::var("BREVO_API_KEY")
            .map_err(|_| InfrastructureError::Config("BREVO_API_KEY not set".to_string()))?;
        let from_email = std::env::var("BREVO_SENDER_EMAIL")
            .map_err(|_| InfrastructureError::Config("BREVO_SENDER_EMAIL not set".to_string()))?;

        Ok(Self {
            api_key,
            from_email,
            from_name: std::env::var("BREVO_SENDER_NAME").ok(),
            max_retries: std::env::var("BREVO_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("BREVO_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("BREVO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailBody {
    sender: BrevoEmailAddress,
    to: Vec<BrevoEmailAddress>,
    subject: String,
    text_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendResponse {
    message_id: String,
}

/// Brevo mail service implementation
pub struct BrevoMailService {
    client: reqwest::Client,
    config: BrevoConfig,
}

impl BrevoMailService {
    /// Create a new Brevo mail service
    pub fn new(config: BrevoConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Brevo API key is required".to_string(),
            ));
        }
        if config.from_email.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Brevo sender address is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "Brevo mail service initialized with sender: {}",
            mask_email(&config.from_email)
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = BrevoConfig::from_env()?;
        Self::new(config)
    }

    fn request_body(&self, message: &MailMessage) -> BrevoSendEmailBody {
        BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: self.config.from_email.clone(),
                name: self.config.from_name.clone(),
            },
            to: vec![BrevoEmailAddress {
                email: message.to.clone(),
                name: None,
            }],
            subject: message.subject.clone(),
            text_content: message.text.clone(),
        }
    }

    /// Send with retry logic
    async fn send_with_retry(&self, message: &MailMessage) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(&message.to)
            );

            let result = self
                .client
                .post(BREVO_SEND_URL)
                .header("api-key", &self.config.api_key)
                .header("Accept", "application/json")
                .json(&self.request_body(message))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    let message_id = response
                        .json::<BrevoSendResponse>()
                        .await
                        .map(|r| r.message_id)
                        .unwrap_or_else(|_| "unknown".to_string());
                    info!(
                        "Mail sent successfully to {} with id: {}",
                        mask_email(&message.to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    error!(
                        "Brevo send failed (attempt {}/{}, status {}): {}",
                        attempts, self.config.max_retries, status, body
                    );

                    // Client errors other than rate limiting will not
                    // recover on retry
                    if status.is_client_error() && status.as_u16() != 429 {
                        return Err(InfrastructureError::Mail(format!(
                            "Brevo rejected the request (status {}): {}",
                            status, body
                        )));
                    }
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send mail after {} attempts (status {})",
                            self.config.max_retries, status
                        )));
                    }
                    warn!("Retrying Brevo send after {:?}", delay);
                }
                Err(e) => {
                    error!(
                        "Brevo request error (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send mail after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }
                }
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl MailService for BrevoMailService {
    async fn send(&self, message: &MailMessage) -> Result<String, InfrastructureError> {
        info!(
            "Sending mail to {} via Brevo (body length: {} chars)",
            mask_email(&message.to),
            message.text.len()
        );
        self.send_with_retry(message).await
    }

    fn provider_name(&self) -> &str {
        "Brevo"
    }
}
