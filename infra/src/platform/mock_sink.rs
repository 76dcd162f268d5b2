//! Mock platform sink for development
//!
//! Records decisions instead of delivering them.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::platform::decision_sink::{mask_token, PlatformSink};
use crate::InfrastructureError;

/// A decision recorded by the mock sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDecision {
    pub request_token: String,
    pub approve: bool,
    pub reason: Option<String>,
}

/// Platform sink that records decisions instead of delivering them
#[derive(Default)]
pub struct MockPlatformSink {
    decisions: Mutex<Vec<RecordedDecision>>,
}

impl MockPlatformSink {
    /// Create a new mock platform sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Decisions recorded so far
    pub fn decisions(&self) -> Vec<RecordedDecision> {
        self.decisions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl PlatformSink for MockPlatformSink {
    async fn resolve_request(
        &self,
        request_token: &str,
        approve: bool,
        reason: Option<&str>,
    ) -> Result<(), InfrastructureError> {
        info!(
            request_token = %mask_token(request_token),
            approve = approve,
            "Mock platform sink: decision recorded instead of delivered"
        );
        self.decisions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedDecision {
                request_token: request_token.to_string(),
                approve,
                reason: reason.map(String::from),
            });
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
