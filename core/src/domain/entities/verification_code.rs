//! Verification code entity for email-based verification.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::pending_identity::PendingIdentity;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code the generator may produce
pub const CODE_MIN: u32 = 100_000;

/// Largest code the generator may produce
pub const CODE_MAX: u32 = 999_999;

/// A one-time code bound to a pending identity
///
/// Stored under the code key for the code TTL. `exp` carries the lifetime in
/// nanoseconds, the encoding older records use, and is informational; expiry
/// itself is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Session id of the identity the code was issued for
    #[serde(rename = "id")]
    pub session_id: String,

    /// Email address the code was sent to
    pub email: String,

    /// Lifetime in nanoseconds
    #[serde(rename = "exp")]
    pub expires_in_nanos: u64,

    /// The code itself; records written without it are still readable
    #[serde(default)]
    pub code: String,
}

impl VerificationCode {
    /// Creates a code record for the given identity
    pub fn new(identity: &PendingIdentity, code: impl Into<String>, ttl: Duration) -> Self {
        Self {
            session_id: identity.id.clone(),
            email: identity.email.clone(),
            expires_in_nanos: u64::try_from(ttl.as_nanos()).unwrap_or(u64::MAX),
            code: code.into(),
        }
    }

    /// Nominal lifetime of the code
    pub fn expires_in(&self) -> Duration {
        Duration::from_nanos(self.expires_in_nanos)
    }

    /// Whether the record was issued for this identity's address
    pub fn belongs_to(&self, identity: &PendingIdentity) -> bool {
        self.email == identity.email
    }

    /// Checks that a code is exactly six ASCII digits
    pub fn is_well_formed(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }
}
