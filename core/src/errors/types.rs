//! Error types for the record store and the verification handshake
//!
//! Messages of `AuthError` are what callers see; they deliberately do not say
//! which of the two verification records was missing.

use thiserror::Error;

/// Record store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key never existed or its TTL elapsed
    #[error("Record not found: {key}")]
    NotFound { key: String },

    /// The caller's deadline passed before the store answered
    #[error("Store operation timed out: {operation}")]
    Timeout { operation: String },

    /// The backing medium is unreachable or returned an error
    #[error("Store unavailable: {message}")]
    Transport { message: String },

    /// A record exists but could not be encoded or decoded
    #[error("Record serialization failed: {message}")]
    Serialization { message: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Verification and admission failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("invalid code")]
    InvalidCode,

    #[error("session expired or unknown")]
    SessionExpired,

    #[error("too many requests")]
    RateLimited,

    #[error("email delivery failed: {message}")]
    DeliveryFailed { message: String },
}
