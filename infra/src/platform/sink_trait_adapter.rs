//! Decision Sink Trait Adapter
//!
//! This module provides an adapter that implements the core
//! DecisionSinkTrait for any infrastructure platform sink, bridging the
//! platform implementation with the core domain trait.

use async_trait::async_trait;
use mg_core::services::gate::DecisionSinkTrait;

use crate::platform::decision_sink::PlatformSink;

/// Adapter that implements the core DecisionSinkTrait
pub struct DecisionSinkAdapter {
    inner: Box<dyn PlatformSink>,
}

impl DecisionSinkAdapter {
    /// Create a new adapter around a platform sink
    pub fn new(inner: Box<dyn PlatformSink>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DecisionSinkTrait for DecisionSinkAdapter {
    async fn approve(&self, request_token: &str) -> Result<(), String> {
        self.inner
            .resolve_request(request_token, true, None)
            .await
            .map_err(|e| e.to_string())
    }

    async fn deny(&self, request_token: &str, reason: &str) -> Result<(), String> {
        self.inner
            .resolve_request(request_token, false, Some(reason))
            .await
            .map_err(|e| e.to_string())
    }
}
