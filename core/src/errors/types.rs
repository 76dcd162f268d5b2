//! Gate-specific error types
//!
//! These errors represent the failure modes of the verification gate.
//! User-facing variants are communicated by denying the underlying join
//! request, never by propagating past the event boundary; their display
//! messages are the deny reasons shown to the applicant.

use thiserror::Error;

/// Verification gate errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Invalid email address format")]
    InvalidEmailFormat,

    #[error("Email suffix is not allowed for this group")]
    SuffixNotAllowed,

    #[error("Request a verification code first by applying with your email address")]
    NoActiveSession,

    #[error("Verification code expired, please submit a new application")]
    SessionExpired,

    #[error("Incorrect verification code")]
    CodeMismatch,

    #[error("The verification mail could not be delivered, please try again later")]
    MailDeliveryFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_reasons_are_user_readable() {
        assert_eq!(
            GateError::CodeMismatch.to_string(),
            "Incorrect verification code"
        );
        assert!(GateError::SessionExpired
            .to_string()
            .contains("submit a new application"));
    }
}
