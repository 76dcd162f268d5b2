//! OneBot Platform Sink Implementation
//!
//! This module resolves group-join requests through the OneBot v11 HTTP
//! API (`set_group_add_request`). It implements the PlatformSink trait
//! for production decision delivery.
//!
//! ## Features
//!
//! - Optional bearer token authentication
//! - Automatic retry logic with exponential backoff
//! - Request timeout handling

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::platform::decision_sink::{mask_token, PlatformSink};
use crate::InfrastructureError;

/// OneBot platform sink configuration
#[derive(Debug, Clone)]
pub struct OneBotConfig {
    /// Base URL of the OneBot HTTP API (e.g. `http://127.0.0.1:5700`)
    pub api_base: String,
    /// Access token, sent as a bearer Authorization header when set
    pub access_token: Option<String>,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for OneBotConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            access_token: None,
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl OneBotConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_base = std::env::var("ONEBOT_API_BASE")
            .map_err(|_| InfrastructureError::Config("ONEBOT_API_BASE not set".to_string()))?;

        Ok(Self {
            api_base,
            access_token: std::env::var("ONEBOT_ACCESS_TOKEN").ok(),
            max_retries: std::env::var("ONEBOT_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("ONEBOT_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("ONEBOT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Debug, Serialize)]
struct SetGroupAddRequestBody<'a> {
    flag: &'a str,
    /// Always "add" for join requests (as opposed to invitations)
    sub_type: &'a str,
    approve: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct OneBotApiResponse {
    status: String,
    retcode: i64,
}

/// OneBot platform sink implementation
pub struct OneBotSink {
    client: reqwest::Client,
    config: OneBotConfig,
}

impl OneBotSink {
    /// Create a new OneBot platform sink
    pub fn new(config: OneBotConfig) -> Result<Self, InfrastructureError> {
        if config.api_base.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "OneBot API base URL is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                InfrastructureError::Platform(format!("Failed to build HTTP client: {}", e))
            })?;

        info!("OneBot platform sink initialized against {}", config.api_base);

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = OneBotConfig::from_env()?;
        Self::new(config)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/set_group_add_request",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Call the API with retry logic
    async fn call_with_retry(
        &self,
        body: &SetGroupAddRequestBody<'_>,
    ) -> Result<(), InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Resolving join request attempt {}/{} (flag {})",
                attempts,
                self.config.max_retries,
                mask_token(body.flag)
            );

            let mut request = self.client.post(self.endpoint()).json(body);
            if let Some(token) = &self.config.access_token {
                request = request.bearer_auth(token);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    // The HTTP layer succeeded; the API payload still
                    // carries its own status
                    match response.json::<OneBotApiResponse>().await {
                        Ok(api) if api.retcode == 0 => {
                            info!(
                                "Join request {} resolved (approve: {})",
                                mask_token(body.flag),
                                body.approve
                            );
                            return Ok(());
                        }
                        Ok(api) => {
                            return Err(InfrastructureError::Platform(format!(
                                "OneBot rejected the call (status {}, retcode {})",
                                api.status, api.retcode
                            )));
                        }
                        Err(e) => {
                            return Err(InfrastructureError::Platform(format!(
                                "Unreadable OneBot response: {}",
                                e
                            )));
                        }
                    }
                }
                Ok(response) => {
                    let status = response.status();
                    error!(
                        "OneBot call failed (attempt {}/{}, status {})",
                        attempts, self.config.max_retries, status
                    );
                    if status.is_client_error() {
                        return Err(InfrastructureError::Platform(format!(
                            "OneBot rejected the request (status {})",
                            status
                        )));
                    }
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Platform(format!(
                            "Failed to resolve join request after {} attempts (status {})",
                            self.config.max_retries, status
                        )));
                    }
                    warn!("Retrying OneBot call after {:?}", delay);
                }
                Err(e) => {
                    error!(
                        "OneBot request error (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Platform(format!(
                            "Failed to resolve join request after {} attempts: {}",
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
impl PlatformSink for OneBotSink {
    async fn resolve_request(
        &self,
        request_token: &str,
        approve: bool,
        reason: Option<&str>,
    ) -> Result<(), InfrastructureError> {
        let body = SetGroupAddRequestBody {
            flag: request_token,
            sub_type: "add",
            approve,
            reason,
        };
        self.call_with_retry(&body).await
    }

    fn provider_name(&self) -> &str {
        "OneBot"
    }
}
