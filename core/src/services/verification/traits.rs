//! Traits for email delivery and identifier generation

use async_trait::async_trait;

/// Trait for email delivery integration
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a plain-text message to a single recipient
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}

/// Source of session ids for new pending identities
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Source of six-digit verification codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}
