//! Key layout of the ephemeral record store.
//!
//! Deployment-wide prefixes are applied by the store implementation, not here.

/// Key of a pending identity
pub fn identity_key(session_id: &str) -> String {
    format!("identity:{}", session_id)
}

/// Key of a verification code record addressed by its code value
pub fn code_key(code: &str) -> String {
    format!("code:{}", code)
}

/// Key of a verification code record addressed by its session
pub fn session_code_key(session_id: &str) -> String {
    format!("code:session:{}", session_id)
}

/// Key of a rate-limit marker for a client address
pub fn rate_limit_key(address: &str) -> String {
    format!("ratelimit:{}", address)
}
