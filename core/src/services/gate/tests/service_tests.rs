//! Unit tests for the gate service

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::GateError;
use crate::services::gate::config::GateServiceConfig;
use crate::services::gate::service::GateService;
use crate::services::gate::types::{GateOutcome, JoinRequest};

use super::mocks::{Decision, MockDecisionSink, MockMailService};

fn request(message: &str) -> JoinRequest {
    JoinRequest {
        applicant_id: "applicant-1".to_string(),
        group_id: "g42".to_string(),
        request_token: "token-1".to_string(),
        message: message.to_string(),
    }
}

fn request_with_token(message: &str, token: &str) -> JoinRequest {
    JoinRequest {
        request_token: token.to_string(),
        ..request(message)
    }
}

fn service_with(
    mail_fails: bool,
    config: GateServiceConfig,
) -> (
    GateService<MockMailService, MockDecisionSink>,
    Arc<MockMailService>,
    Arc<MockDecisionSink>,
) {
    let mail = Arc::new(MockMailService::new(mail_fails));
    let sink = Arc::new(MockDecisionSink::new(false));
    let service = GateService::new(Arc::clone(&mail), Arc::clone(&sink), config);
    (service, mail, sink)
}

#[tokio::test]
async fn test_application_sends_code_and_denies_with_instructions() {
    let (service, mail, sink) = service_with(false, GateServiceConfig::default());

    let outcome = service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::CodeSent);
    assert_eq!(service.live_sessions().await, 1);

    let sent = mail.last_sent().unwrap();
    assert_eq!(sent.to, "alice@example.com");
    assert_eq!(sent.subject, "Group join verification code");
    let code = sent.code().unwrap();
    assert!(sent.body.contains(&format!("validate {}", code)));

    // The original request is denied with re-apply instructions; the
    // full address never appears in the reply
    match sink.last_decision().unwrap() {
        Decision::Denied {
            request_token,
            reason,
        } => {
            assert_eq!(request_token, "token-1");
            assert!(reason.contains("ali***@example.com"));
            assert!(!reason.contains("alice@example.com"));
            assert!(reason.contains("validate"));
        }
        other => panic!("expected deny with instructions, got {:?}", other),
    }
}

#[tokio::test]
async fn test_round_trip_approval() {
    let (service, mail, sink) = service_with(false, GateServiceConfig::default());

    service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();
    let code = mail.last_sent().unwrap().code().unwrap();

    let outcome = service
        .handle_request(&request_with_token(
            &format!("validate {}", code),
            "token-2",
        ))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::Approved);
    assert_eq!(service.live_sessions().await, 0);
    assert_eq!(
        sink.last_decision(),
        Some(Decision::Approved {
            request_token: "token-2".to_string()
        })
    );
}

#[tokio::test]
async fn test_wrong_code_keeps_session_for_retry() {
    let (service, mail, sink) = service_with(false, GateServiceConfig::default());

    service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();
    let code = mail.last_sent().unwrap().code().unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let outcome = service
        .handle_request(&request_with_token(&format!("validate {}", wrong), "token-2"))
        .await
        .unwrap();
    assert_eq!(outcome, GateOutcome::CodeMismatch);
    assert_eq!(service.live_sessions().await, 1);
    assert_eq!(
        sink.last_decision(),
        Some(Decision::Denied {
            request_token: "token-2".to_string(),
            reason: GateError::CodeMismatch.to_string(),
        })
    );

    // The correct code still succeeds afterwards
    let outcome = service
        .handle_request(&request_with_token(&format!("validate {}", code), "token-3"))
        .await
        .unwrap();
    assert_eq!(outcome, GateOutcome::Approved);
    assert_eq!(service.live_sessions().await, 0);
}

#[tokio::test]
async fn test_replayed_code_after_approval_finds_no_session() {
    let (service, mail, _sink) = service_with(false, GateServiceConfig::default());

    service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();
    let code = mail.last_sent().unwrap().code().unwrap();
    let reply = format!("validate {}", code);

    service
        .handle_request(&request_with_token(&reply, "token-2"))
        .await
        .unwrap();
    let outcome = service
        .handle_request(&request_with_token(&reply, "token-3"))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::NoActiveSession);
}

#[tokio::test]
async fn test_code_reply_without_session() {
    let (service, mail, sink) = service_with(false, GateServiceConfig::default());

    let outcome = service
        .handle_request(&request("validate 123456"))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::NoActiveSession);
    assert_eq!(mail.sent_count(), 0);
    assert_eq!(
        sink.last_decision(),
        Some(Decision::Denied {
            request_token: "token-1".to_string(),
            reason: GateError::NoActiveSession.to_string(),
        })
    );
}

#[tokio::test]
async fn test_suffix_policy_denies_before_any_session() {
    let mut config = GateServiceConfig::default();
    config.group_mail_suffixes =
        HashMap::from([("g42".to_string(), vec!["@example.com".to_string()])]);
    let (service, mail, sink) = service_with(false, config);

    let outcome = service
        .handle_request(&request("alice@other.com"))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::PolicyRejected);
    assert_eq!(service.live_sessions().await, 0);
    assert_eq!(mail.sent_count(), 0);
    assert_eq!(
        sink.last_decision(),
        Some(Decision::Denied {
            request_token: "token-1".to_string(),
            reason: GateError::SuffixNotAllowed.to_string(),
        })
    );
}

#[tokio::test]
async fn test_suffix_policy_admits_allowed_address() {
    let mut config = GateServiceConfig::default();
    config.group_mail_suffixes =
        HashMap::from([("g42".to_string(), vec!["@example.com".to_string()])]);
    let (service, _mail, _sink) = service_with(false, config);

    let outcome = service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::CodeSent);
    assert_eq!(service.live_sessions().await, 1);
}

#[tokio::test]
async fn test_unrecognized_message_emits_no_decision() {
    let (service, mail, sink) = service_with(false, GateServiceConfig::default());

    let outcome = service
        .handle_request(&request("hello, let me in"))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::Ignored);
    assert_eq!(mail.sent_count(), 0);
    assert_eq!(sink.decision_count(), 0);
    assert_eq!(service.live_sessions().await, 0);
}

#[tokio::test]
async fn test_mail_failure_drops_session_and_denies() {
    let (service, _mail, sink) = service_with(true, GateServiceConfig::default());

    let outcome = service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();

    assert_eq!(outcome, GateOutcome::MailFailed);
    assert_eq!(service.live_sessions().await, 0);
    assert_eq!(
        sink.last_decision(),
        Some(Decision::Denied {
            request_token: "token-1".to_string(),
            reason: GateError::MailDeliveryFailure.to_string(),
        })
    );
}

#[tokio::test]
async fn test_new_application_supersedes_pending_session() {
    let (service, mail, _sink) = service_with(false, GateServiceConfig::default());

    service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();
    let first_code = mail.last_sent().unwrap().code().unwrap();

    service
        .handle_request(&request_with_token("alice@example.com", "token-2"))
        .await
        .unwrap();
    let second_code = mail.last_sent().unwrap().code().unwrap();

    assert_eq!(service.live_sessions().await, 1);
    assert_eq!(mail.sent_count(), 2);

    // Only the latest code opens the gate; the first is dead unless the
    // codes happen to collide
    if first_code != second_code {
        let outcome = service
            .handle_request(&request_with_token(
                &format!("validate {}", first_code),
                "token-3",
            ))
            .await
            .unwrap();
        assert_eq!(outcome, GateOutcome::CodeMismatch);
    }

    let outcome = service
        .handle_request(&request_with_token(
            &format!("validate {}", second_code),
            "token-4",
        ))
        .await
        .unwrap();
    assert_eq!(outcome, GateOutcome::Approved);
}

#[tokio::test]
async fn test_expired_session_by_timestamp() {
    // TTL of zero: the stored timestamp is already in the past when the
    // reply arrives, regardless of whether the timer task has run
    let mut config = GateServiceConfig::default();
    config.code_ttl_seconds = 0;
    let (service, mail, sink) = service_with(false, config);

    service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();
    let code = mail.last_sent().unwrap().code().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(10));

    let outcome = service
        .handle_request(&request_with_token(&format!("validate {}", code), "token-2"))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        GateOutcome::Expired | GateOutcome::NoActiveSession
    ));
    assert_eq!(service.live_sessions().await, 0);
    match sink.last_decision().unwrap() {
        Decision::Denied { reason, .. } => {
            assert!(
                reason == GateError::SessionExpired.to_string()
                    || reason == GateError::NoActiveSession.to_string()
            );
        }
        other => panic!("expected a deny, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sink_failure_surfaces_as_internal_error() {
    let mail = Arc::new(MockMailService::new(false));
    let sink = Arc::new(MockDecisionSink::new(true));
    let service = GateService::new(Arc::clone(&mail), sink, GateServiceConfig::default());

    let result = service.handle_request(&request("alice@example.com")).await;

    match result {
        Err(crate::errors::DomainError::Internal { message }) => {
            assert!(message.contains("platform unavailable"));
        }
        other => panic!("expected internal error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_each_event_emits_at_most_one_decision() {
    let (service, mail, sink) = service_with(false, GateServiceConfig::default());

    service
        .handle_request(&request("alice@example.com"))
        .await
        .unwrap();
    assert_eq!(sink.decision_count(), 1);

    let code = mail.last_sent().unwrap().code().unwrap();
    service
        .handle_request(&request_with_token(&format!("validate {}", code), "token-2"))
        .await
        .unwrap();
    assert_eq!(sink.decision_count(), 2);
}
