//! Platform Module
//!
//! This module delivers join-request decisions to the hosting chat
//! platform.
//!
//! ## Features
//!
//! - **Platform Sink Trait**: Common interface for all platforms
//! - **Mock Implementation**: Records decisions for development
//! - **OneBot Support**: Resolves group-join requests via the OneBot v11
//!   HTTP API

pub mod decision_sink;
pub mod mock_sink;

pub mod onebot;

pub mod sink_trait_adapter;

// Re-export commonly used types
pub use decision_sink::PlatformSink;
pub use mock_sink::MockPlatformSink;

pub use onebot::{OneBotConfig, OneBotSink};

pub use sink_trait_adapter::DecisionSinkAdapter;

#[cfg(test)]
mod tests;

/// Create a platform sink based on configuration
///
/// Returns the provider named in the configuration, falling back to the
/// mock sink when the provider is unknown or fails to initialize.
pub fn create_platform_sink(
    config: &mg_shared::config::PlatformConfig,
) -> Box<dyn PlatformSink> {
    match config.provider.as_str() {
        "mock" => Box::new(MockPlatformSink::new()),
        "onebot" => {
            let onebot_config = OneBotConfig {
                api_base: config.api_base.clone(),
                access_token: config.access_token.clone(),
                ..OneBotConfig::default()
            };

            match OneBotSink::new(onebot_config) {
                Ok(sink) => Box::new(sink),
                Err(e) => {
                    tracing::error!("Failed to initialize OneBot platform sink: {}", e);
                    tracing::warn!("Falling back to mock platform sink");
                    Box::new(MockPlatformSink::new())
                }
            }
        }
        other => {
            tracing::warn!("Unknown platform provider '{}', using mock sink", other);
            Box::new(MockPlatformSink::new())
        }
    }
}
