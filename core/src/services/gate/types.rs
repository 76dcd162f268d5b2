//! Inbound event and result types for the verification gate

use mg_shared::utils::validation::is_valid_email;

/// Literal prefix marking a code reply
pub const CODE_REPLY_PREFIX: &str = "validate ";

/// A join-request event delivered by the hosting platform
#[derive(Debug, Clone)]
pub struct JoinRequest {
    /// Opaque identity of the requester
    pub applicant_id: String,
    /// Target group identifier
    pub group_id: String,
    /// Opaque handle the platform needs to resolve this request
    pub request_token: String,
    /// Application message supplied by the requester
    pub message: String,
}

/// Classified shape of an application message
///
/// Classification runs before any business logic so the two message
/// shapes are handled by explicit tag rather than order-dependent
/// string checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Application {
    /// A fresh application carrying the applicant's email address
    EmailApplication(String),
    /// A reply echoing a previously mailed code
    CodeReply(String),
    /// Anything else; ignored without a decision
    Unrecognized,
}

impl Application {
    /// Classify a join-request message
    ///
    /// The code-reply prefix is checked first; an email address can
    /// never carry the prefix since it contains a space. The code is
    /// the first whitespace-separated token after the prefix.
    pub fn classify(message: &str) -> Self {
        let message = message.trim();
        if let Some(rest) = message.strip_prefix(CODE_REPLY_PREFIX) {
            let code = rest.split_whitespace().next().unwrap_or("");
            return Application::CodeReply(code.to_string());
        }
        if is_valid_email(message) {
            return Application::EmailApplication(message.to_string());
        }
        Application::Unrecognized
    }
}

/// Per-event outcome of handling a join request
///
/// Surfaced to the embedding host for logging; every variant except
/// `Ignored` corresponds to exactly one decision delivered through the
/// platform sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Message was neither an email nor a code reply; no decision emitted
    Ignored,
    /// Email rejected by the group's suffix policy
    PolicyRejected,
    /// Session created and code mailed; applicant was told to re-apply
    CodeSent,
    /// Mail transport failed; session dropped and request denied
    MailFailed,
    /// Code reply arrived without a live session
    NoActiveSession,
    /// Session had expired before the reply arrived
    Expired,
    /// Reply carried the wrong code; session kept for retry
    CodeMismatch,
    /// Code matched; join request approved
    Approved,
}
