//! Tests for the mock platform sink

use crate::platform::decision_sink::{mask_token, PlatformSink};
use crate::platform::mock_sink::MockPlatformSink;

#[tokio::test]
async fn test_mock_records_decisions() {
    let sink = MockPlatformSink::new();

    sink.resolve_request("flag-1", true, None).await.unwrap();
    sink.resolve_request("flag-2", false, Some("Incorrect verification code"))
        .await
        .unwrap();

    let decisions = sink.decisions();
    assert_eq!(decisions.len(), 2);
    assert!(decisions[0].approve);
    assert!(decisions[0].reason.is_none());
    assert!(!decisions[1].approve);
    assert_eq!(
        decisions[1].reason.as_deref(),
        Some("Incorrect verification code")
    );
}

#[test]
fn test_mask_token() {
    assert_eq!(mask_token("short"), "short");
    assert_eq!(mask_token("a-much-longer-flag-value"), "a-much-l...");
}
