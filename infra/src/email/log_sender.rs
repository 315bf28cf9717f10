use async_trait::async_trait;

use ea_core::services::verification::EmailSender;
use ea_shared::mask_email;

/// Logs that a message would have been sent, without its body
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmailSender;

impl LogEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), String> {
        tracing::info!(
            email = %mask_email(to),
            subject = subject,
            event = "email_suppressed",
            "Email delivery disabled; message not sent"
        );
        Ok(())
    }
}
