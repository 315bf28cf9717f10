//! Configuration for the verification service

use ea_shared::{CodeKeyStrategy, VerificationConfig};
use std::time::Duration;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Lifetime of a pending identity
    pub identity_ttl: Duration,
    /// Lifetime of an issued code
    pub code_ttl: Duration,
    /// Budget shared by every store and delivery call of one request
    pub operation_timeout: Duration,
    /// Subject line of the verification email
    pub email_subject: String,
    /// Keying of code records
    pub code_key_strategy: CodeKeyStrategy,
    /// Delete the code record when it verifies successfully
    pub single_use: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            identity_ttl: Duration::from_secs(config.identity_ttl_seconds),
            code_ttl: Duration::from_secs(config.code_ttl_seconds),
            operation_timeout: Duration::from_secs(config.operation_timeout_seconds),
            email_subject: "verification".to_string(),
            code_key_strategy: config.code_key_strategy,
            single_use: config.single_use,
        }
    }
}

impl VerificationServiceConfig {
    pub fn with_email_subject(mut self, subject: impl Into<String>) -> Self {
        self.email_subject = subject.into();
        self
    }
}
