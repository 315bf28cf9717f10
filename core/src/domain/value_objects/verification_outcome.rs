//! Results handed back by the verification engine.

use serde::Serialize;
use std::time::Duration;

use crate::domain::entities::Purpose;

/// Message returned when a signin identity is verified
pub const SIGNIN_VERIFIED_MESSAGE: &str = "sign up success";

/// Message returned when a signup identity (or an unknown purpose) is verified
pub const SIGNUP_VERIFIED_MESSAGE: &str = "user created";

/// A freshly created pending identity with its first code sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedIdentity {
    pub session_id: String,
    pub purpose: Purpose,
    #[serde(skip)]
    pub code_expires_in: Duration,
}

/// A code written and sent for an existing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedCode {
    pub session_id: String,
    #[serde(skip)]
    pub expires_in: Duration,
}

/// Successful verification of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub session_id: String,
    pub purpose: Purpose,
}

impl VerificationOutcome {
    pub fn new(session_id: impl Into<String>, purpose: Purpose) -> Self {
        Self {
            session_id: session_id.into(),
            purpose,
        }
    }

    /// Purpose-specific success message
    ///
    /// The signin flow answers "sign up success" and everything else answers
    /// "user created". Clients already depend on these exact strings.
    pub fn message(&self) -> &'static str {
        match self.purpose {
            Purpose::Signin => SIGNIN_VERIFIED_MESSAGE,
            Purpose::Signup | Purpose::Other => SIGNUP_VERIFIED_MESSAGE,
        }
    }
}
