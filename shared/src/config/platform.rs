//! Chat platform configuration
//!
//! The platform endpoint is where join-request decisions are delivered.

use serde::{Deserialize, Serialize};

/// Chat platform configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Platform provider ("mock" or "onebot")
    pub provider: String,

    /// Base URL of the platform HTTP API
    #[serde(default)]
    pub api_base: String,

    /// Access token for the platform API, if required
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_base: String::new(),
            access_token: None,
        }
    }
}

impl PlatformConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("PLATFORM_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_base: std::env::var("PLATFORM_API_BASE").unwrap_or_default(),
            access_token: std::env::var("PLATFORM_ACCESS_TOKEN").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_platform_config() {
        let config = PlatformConfig::default();
        assert_eq!(config.provider, "mock");
        assert!(config.access_token.is_none());
    }
}
