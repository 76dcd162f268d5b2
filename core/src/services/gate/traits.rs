//! Traits for mail transport and platform decision integration

use async_trait::async_trait;

/// Trait for the mail transport that delivers verification codes
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a verification mail; returns a provider message id
    async fn send_verification_code(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, String>;
}

/// Trait for resolving join requests on the hosting platform
///
/// Exactly one of `approve`/`deny` is called per join-request event that
/// reaches a terminal decision.
#[async_trait]
pub trait DecisionSinkTrait: Send + Sync {
    /// Approve the join request identified by `request_token`
    async fn approve(&self, request_token: &str) -> Result<(), String>;

    /// Deny the join request with a human-readable reason
    async fn deny(&self, request_token: &str, reason: &str) -> Result<(), String>;
}
