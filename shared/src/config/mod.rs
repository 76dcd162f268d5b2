//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `environment` - Environment detection and logging configuration
//! - `gate` - Verification gate behavior (code TTL, per-group suffix allow-lists)
//! - `mail` - Mail transport provider and sender identity
//! - `platform` - Chat platform endpoint used to resolve join requests

pub mod environment;
pub mod gate;
pub mod mail;
pub mod platform;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use gate::GateConfig;
pub use mail::MailConfig;
pub use platform::PlatformConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Verification gate configuration
    pub gate: GateConfig,

    /// Mail transport configuration
    pub mail: MailConfig,

    /// Chat platform configuration
    pub platform: PlatformConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            gate: GateConfig::default(),
            mail: MailConfig::default(),
            platform: PlatformConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    ///
    /// Uses the mock mail transport and mock platform sink so the gate
    /// can be exercised without external credentials.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            gate: GateConfig::default(),
            mail: MailConfig::default(),
            platform: PlatformConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            gate: GateConfig::from_env(),
            mail: MailConfig::from_env(),
            platform: PlatformConfig::from_env(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            gate: GateConfig::from_env(),
            mail: MailConfig::from_env(),
            platform: PlatformConfig::from_env(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}
