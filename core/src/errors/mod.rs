//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, StoreError, StoreResult};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Whether the failure came from the backing medium rather than the request
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::Timeout { .. }
                | DomainError::Store(StoreError::Transport { .. })
                | DomainError::Store(StoreError::Timeout { .. })
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_do_not_leak_which_record_failed() {
        let expired = DomainError::from(AuthError::InvalidOrExpiredCode);
        let mismatch = DomainError::from(AuthError::InvalidCode);
        assert_eq!(expired.to_string(), "invalid or expired code");
        assert_eq!(mismatch.to_string(), "invalid code");
    }

    #[test]
    fn test_transport_classification() {
        let timeout: DomainError = StoreError::Timeout { operation: "get".to_string() }.into();
        let transport: DomainError = StoreError::Transport { message: "refused".to_string() }.into();
        let missing: DomainError = StoreError::NotFound { key: "code:123456".to_string() }.into();

        assert!(timeout.is_transport());
        assert!(transport.is_transport());
        assert!(!missing.is_transport());
        assert!(DomainError::Timeout { operation: "email".to_string() }.is_transport());
    }
}
