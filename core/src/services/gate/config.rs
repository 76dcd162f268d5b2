//! Configuration for the gate service

use std::collections::HashMap;

use mg_shared::config::{GateConfig, MailConfig};

use crate::domain::entities::verification_session::DEFAULT_TTL_SECONDS;

/// Configuration for the gate service
#[derive(Debug, Clone)]
pub struct GateServiceConfig {
    /// Seconds before a verification code expires
    pub code_ttl_seconds: u64,
    /// Subject line for verification mails
    pub mail_subject: String,
    /// Per-group allow-list of email suffixes
    pub group_mail_suffixes: HashMap<String, Vec<String>>,
}

impl Default for GateServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_TTL_SECONDS,
            mail_subject: String::from("Group join verification code"),
            group_mail_suffixes: HashMap::new(),
        }
    }
}

impl GateServiceConfig {
    /// Build the service configuration from the shared config surface
    pub fn from_shared(gate: &GateConfig, mail: &MailConfig) -> Self {
        Self {
            code_ttl_seconds: gate.code_ttl_seconds,
            mail_subject: mail.subject.clone(),
            group_mail_suffixes: gate.group_mail_suffixes.clone(),
        }
    }
}
