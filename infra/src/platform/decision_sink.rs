//! Platform sink trait for join-request decision delivery

use async_trait::async_trait;

use crate::InfrastructureError;

/// Common interface for all platform decision sinks
///
/// A single `resolve_request` call mirrors the wire shape of the
/// platforms this gate runs against: one request handle, an
/// approve/deny flag, and an optional reason shown to the applicant.
#[async_trait]
pub trait PlatformSink: Send + Sync {
    /// Resolve the join request identified by `request_token`
    async fn resolve_request(
        &self,
        request_token: &str,
        approve: bool,
        reason: Option<&str>,
    ) -> Result<(), InfrastructureError>;

    /// Human-readable provider name
    fn provider_name(&self) -> &str;
}

/// Shorten a request token for log output
pub fn mask_token(token: &str) -> String {
    if token.len() <= 8 {
        token.to_string()
    } else {
        format!("{}...", &token[..8])
    }
}
