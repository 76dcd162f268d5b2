//! Gate service coordinating join requests against the session store

use std::sync::Arc;

use crate::domain::entities::verification_session::VerificationSession;
use crate::errors::{DomainError, DomainResult, GateError};

use super::config::GateServiceConfig;
use super::policy;
use super::store::SessionStore;
use super::traits::{DecisionSinkTrait, MailServiceTrait};
use super::types::{Application, GateOutcome, JoinRequest};

/// Verification gate service for mail-based join approval
///
/// Each inbound join request is classified and handled to completion:
/// a fresh email application creates a session and mails its code, a
/// code reply is matched against the live session, and everything else
/// is ignored. Every terminal path emits exactly one decision through
/// the platform sink.
pub struct GateService<M: MailServiceTrait, D: DecisionSinkTrait + 'static> {
    /// Mail transport for delivering verification codes
    mail_service: Arc<M>,
    /// Platform sink receiving approve/deny decisions
    decision_sink: Arc<D>,
    /// Live sessions keyed by applicant
    store: SessionStore<D>,
    /// Service configuration
    config: GateServiceConfig,
}

impl<M: MailServiceTrait, D: DecisionSinkTrait + 'static> GateService<M, D> {
    /// Create a new gate service
    ///
    /// # Arguments
    ///
    /// * `mail_service` - Mail transport implementation
    /// * `decision_sink` - Platform decision sink implementation
    /// * `config` - Service configuration
    pub fn new(mail_service: Arc<M>, decision_sink: Arc<D>, config: GateServiceConfig) -> Self {
        let store = SessionStore::new(Arc::clone(&decision_sink), config.code_ttl_seconds);
        Self {
            mail_service,
            decision_sink,
            store,
            config,
        }
    }

    /// Handle one inbound join-request event to completion
    ///
    /// User-facing failures become deny reasons; `Err` is reserved for
    /// decision-delivery failures and never leaves sessions in an
    /// inconsistent state.
    pub async fn handle_request(&self, request: &JoinRequest) -> DomainResult<GateOutcome> {
        match Application::classify(&request.message) {
            Application::EmailApplication(email) => self.handle_application(request, &email).await,
            Application::CodeReply(code) => self.handle_code_reply(request, &code).await,
            Application::Unrecognized => {
                tracing::debug!(
                    applicant_id = %request.applicant_id,
                    group_id = %request.group_id,
                    event = "message_ignored",
                    "Join request message is neither an email nor a code reply"
                );
                Ok(GateOutcome::Ignored)
            }
        }
    }

    /// Number of live verification sessions
    pub async fn live_sessions(&self) -> usize {
        self.store.len().await
    }

    /// Handle a fresh application carrying an email address
    ///
    /// The decision on the original request is emitted only after the
    /// mail send attempt has resolved.
    async fn handle_application(
        &self,
        request: &JoinRequest,
        email: &str,
    ) -> DomainResult<GateOutcome> {
        if !policy::is_allowed(&request.group_id, email, &self.config.group_mail_suffixes) {
            tracing::info!(
                applicant_id = %request.applicant_id,
                group_id = %request.group_id,
                event = "suffix_rejected",
                "Email suffix not in the group's allow-list"
            );
            self.deny(&request.request_token, &GateError::SuffixNotAllowed.to_string())
                .await?;
            return Ok(GateOutcome::PolicyRejected);
        }

        let session = self
            .store
            .create(&request.applicant_id, &request.group_id, email, &request.request_token)
            .await;
        tracing::info!(
            applicant_id = %request.applicant_id,
            group_id = %request.group_id,
            session_id = %session.id,
            event = "session_created",
            "Created verification session, sending code by mail"
        );

        let body = self.compose_mail_body(&session);
        match self
            .mail_service
            .send_verification_code(email, &self.config.mail_subject, &body)
            .await
        {
            Ok(message_id) => {
                tracing::info!(
                    session_id = %session.id,
                    message_id = %message_id,
                    event = "code_mailed",
                    "Verification code sent"
                );
                let instructions = format!(
                    "A verification code has been sent to {}. Submit a new join request with \
                     the content \"validate <code>\" to complete verification.",
                    session.masked_email()
                );
                self.deny(&request.request_token, &instructions).await?;
                Ok(GateOutcome::CodeSent)
            }
            Err(e) => {
                tracing::error!(
                    session_id = %session.id,
                    error = %e,
                    event = "mail_send_failed",
                    "Failed to deliver verification code"
                );
                // No code ever reached the applicant; drop the session
                // rather than leave an unanswerable challenge live.
                self.store.resolve(&request.applicant_id).await;
                self.deny(
                    &request.request_token,
                    &GateError::MailDeliveryFailure.to_string(),
                )
                .await?;
                Ok(GateOutcome::MailFailed)
            }
        }
    }

    /// Handle a reply echoing a previously mailed code
    async fn handle_code_reply(
        &self,
        request: &JoinRequest,
        code: &str,
    ) -> DomainResult<GateOutcome> {
        let Some(session) = self.store.get(&request.applicant_id).await else {
            self.deny(&request.request_token, &GateError::NoActiveSession.to_string())
                .await?;
            return Ok(GateOutcome::NoActiveSession);
        };

        // The timestamp is authoritative even if the expiry timer has
        // not fired yet.
        if session.is_expired() {
            self.store.resolve(&request.applicant_id).await;
            tracing::info!(
                applicant_id = %request.applicant_id,
                session_id = %session.id,
                event = "reply_after_expiry",
                "Code reply arrived after the session expired"
            );
            self.deny(&request.request_token, &GateError::SessionExpired.to_string())
                .await?;
            return Ok(GateOutcome::Expired);
        }

        if !session.matches(code) {
            tracing::info!(
                applicant_id = %request.applicant_id,
                session_id = %session.id,
                event = "code_mismatch",
                "Code reply did not match, session kept for retry"
            );
            self.deny(&request.request_token, &GateError::CodeMismatch.to_string())
                .await?;
            return Ok(GateOutcome::CodeMismatch);
        }

        self.store.resolve(&request.applicant_id).await;
        self.decision_sink
            .approve(&request.request_token)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to deliver approve decision: {}", e),
            })?;
        tracing::info!(
            applicant_id = %request.applicant_id,
            group_id = %request.group_id,
            session_id = %session.id,
            event = "request_approved",
            "Verification succeeded, join request approved"
        );
        Ok(GateOutcome::Approved)
    }

    /// Compose the verification mail body for a session
    fn compose_mail_body(&self, session: &VerificationSession) -> String {
        format!(
            "Your group join verification code is {code}. It is valid for {ttl} seconds.\n\
             To complete verification, submit a new join request with the content \
             \"validate {code}\".",
            code = session.code,
            ttl = self.config.code_ttl_seconds,
        )
    }

    /// Deny a join request, mapping sink failures to internal errors
    async fn deny(&self, request_token: &str, reason: &str) -> DomainResult<()> {
        self.decision_sink
            .deny(request_token, reason)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to deliver deny decision: {}", e),
            })
    }
}
