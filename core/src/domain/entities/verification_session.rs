//! Verification session entity for mail-based join gating.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mg_shared::utils::validation::mask_email;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default validity window for verification codes (10 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 600;

/// One pending code-for-approval exchange
///
/// A session binds an applicant's join request to the code mailed to
/// their address. The `expires_at` timestamp is authoritative: a session
/// past it is invalid even if the cleanup timer has not fired yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Unique identifier for this session generation
    ///
    /// Distinguishes a superseded session from its replacement, so a
    /// stale expiry timer can never delete a fresh session.
    pub id: Uuid,

    /// Opaque identity of the requester (store key)
    pub applicant_id: String,

    /// Target group identifier
    pub group_id: String,

    /// Address the code was sent to
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Opaque handle the platform needs to resolve the join request
    pub request_token: String,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationSession {
    /// Creates a new verification session with a fresh random code
    ///
    /// # Arguments
    ///
    /// * `applicant_id` - Identity of the requester
    /// * `group_id` - Target group
    /// * `email` - Address the code will be mailed to
    /// * `request_token` - Platform handle for the join request
    /// * `ttl_seconds` - Validity window for the code
    pub fn new(
        applicant_id: String,
        group_id: String,
        email: String,
        request_token: String,
        ttl_seconds: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            applicant_id,
            group_id,
            email,
            code: Self::generate_code(),
            request_token,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds as i64),
        }
    }

    /// Generates a random 6-digit code from the OS CSPRNG
    ///
    /// The modulo reduction carries a negligible bias for a 6-digit range.
    fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", num)
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Compares a provided code against this session's code
    ///
    /// Constant-time comparison; does not check expiry.
    pub fn matches(&self, input_code: &str) -> bool {
        if self.code.len() != input_code.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// The session's email address masked for replies and logs
    pub fn masked_email(&self) -> String {
        mask_email(&self.email)
    }
}
