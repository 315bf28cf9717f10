//! Email module for verification code delivery
//!
//! Provides the SMTP sender used in deployments, a sender that only logs,
//! and a recording sender for tests.

pub mod log_sender;
pub mod mock;
pub mod smtp;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use ea_core::services::verification::EmailSender;
use ea_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub use log_sender::LogEmailSender;
pub use mock::MockEmailSender;
pub use smtp::SmtpEmailSender;

/// Build the sender selected by `config.provider`
pub fn create_email_sender(config: &EmailConfig) -> Result<Arc<dyn EmailSender>, InfrastructureError> {
    match config.provider {
        EmailProvider::Smtp => Ok(Arc::new(SmtpEmailSender::new(config)?)),
        EmailProvider::Log => {
            tracing::warn!("Email provider is 'log'; verification codes are not delivered");
            Ok(Arc::new(LogEmailSender::new()))
        }
    }
}
