//! Mail transport configuration

use serde::{Deserialize, Serialize};

/// Mail transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("mock" or "brevo")
    pub provider: String,

    /// Provider API key
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    pub from_email: String,

    /// Sender display name
    #[serde(default)]
    pub from_name: Option<String>,

    /// Subject line for verification mails
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_key: String::new(),
            from_email: String::from("no-reply@localhost"),
            from_name: None,
            subject: default_subject(),
        }
    }
}

impl MailConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            from_email: std::env::var("MAIL_FROM_EMAIL")
                .unwrap_or_else(|_| "no-reply@localhost".to_string()),
            from_name: std::env::var("MAIL_FROM_NAME").ok(),
            subject: std::env::var("MAIL_SUBJECT").unwrap_or_else(|_| default_subject()),
        }
    }
}

fn default_subject() -> String {
    String::from("Group join verification code")
}
