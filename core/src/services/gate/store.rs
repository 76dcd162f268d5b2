//! In-memory session store with scheduled expiry
//!
//! The store owns the applicant-to-session map and every session's
//! expiry timer. All mutation goes through `create`/`resolve`; the map
//! is never exposed directly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::entities::verification_session::VerificationSession;
use crate::errors::GateError;

use super::traits::DecisionSinkTrait;

/// A live session paired with its scheduled expiry task
struct StoredSession {
    session: VerificationSession,
    expiry_handle: JoinHandle<()>,
}

/// In-memory store mapping applicants to their live verification session
///
/// At most one session exists per applicant at any time; creating a new
/// one supersedes the old entry and aborts its expiry task. The expiry
/// task denies the stale join request when it fires.
pub struct SessionStore<D: DecisionSinkTrait + 'static> {
    sessions: Arc<Mutex<HashMap<String, StoredSession>>>,
    decision_sink: Arc<D>,
    code_ttl_seconds: u64,
}

impl<D: DecisionSinkTrait + 'static> SessionStore<D> {
    /// Create a new empty store
    ///
    /// # Arguments
    ///
    /// * `decision_sink` - Sink used to deny requests whose session expires
    /// * `code_ttl_seconds` - Validity window applied to every session
    pub fn new(decision_sink: Arc<D>, code_ttl_seconds: u64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            decision_sink,
            code_ttl_seconds,
        }
    }

    /// Create a session for an applicant, superseding any existing one
    ///
    /// The previous session's expiry task is aborted before the new
    /// session is armed, so a stale timer can never delete the fresh
    /// entry. Returns a clone of the new session; the caller needs its
    /// `code` to compose the mail.
    pub async fn create(
        &self,
        applicant_id: &str,
        group_id: &str,
        email: &str,
        request_token: &str,
    ) -> VerificationSession {
        let session = VerificationSession::new(
            applicant_id.to_string(),
            group_id.to_string(),
            email.to_string(),
            request_token.to_string(),
            self.code_ttl_seconds,
        );

        let mut sessions = self.sessions.lock().await;
        if let Some(previous) = sessions.remove(applicant_id) {
            previous.expiry_handle.abort();
            tracing::info!(
                applicant_id = applicant_id,
                superseded_session = %previous.session.id,
                event = "session_superseded",
                "Replaced live verification session with a fresh one"
            );
        }

        let expiry_handle = self.spawn_expiry(&session);
        sessions.insert(
            applicant_id.to_string(),
            StoredSession {
                session: session.clone(),
                expiry_handle,
            },
        );
        session
    }

    /// Look up an applicant's live session without mutating the store
    pub async fn get(&self, applicant_id: &str) -> Option<VerificationSession> {
        self.sessions
            .lock()
            .await
            .get(applicant_id)
            .map(|stored| stored.session.clone())
    }

    /// Resolve an applicant's session: cancel its expiry and remove it
    ///
    /// Idempotent; resolving an absent applicant is a no-op returning
    /// `None`.
    pub async fn resolve(&self, applicant_id: &str) -> Option<VerificationSession> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(applicant_id).map(|stored| {
            stored.expiry_handle.abort();
            stored.session
        })
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether no session is live
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Arm the one-shot expiry task for a session
    ///
    /// The task removes the entry only if the stored session still has
    /// the id it was armed with, then denies the stale join request.
    /// The lock is released before the deny call goes out.
    fn spawn_expiry(&self, session: &VerificationSession) -> JoinHandle<()> {
        let sessions = Arc::clone(&self.sessions);
        let sink = Arc::clone(&self.decision_sink);
        let applicant_id = session.applicant_id.clone();
        let session_id = session.id;
        let request_token = session.request_token.clone();
        let ttl = Duration::from_secs(self.code_ttl_seconds);

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;

            let expired = {
                let mut sessions = sessions.lock().await;
                if entry_matches(&sessions, &applicant_id, session_id) {
                    sessions.remove(&applicant_id)
                } else {
                    None
                }
            };

            if expired.is_some() {
                tracing::info!(
                    applicant_id = %applicant_id,
                    session_id = %session_id,
                    event = "session_expired",
                    "Verification session expired, denying stale join request"
                );
                if let Err(e) = sink
                    .deny(&request_token, &GateError::SessionExpired.to_string())
                    .await
                {
                    tracing::error!(
                        applicant_id = %applicant_id,
                        error = %e,
                        event = "decision_delivery_failed",
                        "Failed to deny expired join request"
                    );
                }
            }
        })
    }
}

/// Whether the stored entry for `applicant_id` is still the generation
/// the expiry task was armed for
fn entry_matches(
    sessions: &HashMap<String, StoredSession>,
    applicant_id: &str,
    session_id: Uuid,
) -> bool {
    sessions
        .get(applicant_id)
        .map(|stored| stored.session.id == session_id)
        .unwrap_or(false)
}
