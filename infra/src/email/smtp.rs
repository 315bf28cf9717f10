//! SMTP delivery through lettre's async transport

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use ea_core::services::verification::EmailSender;
use ea_shared::{mask_email, EmailConfig};

use crate::InfrastructureError;

/// Sends one plain-text message per code
///
/// The body is the code itself.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.from.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid sender address '{}': {}", config.from, e))
        })?;

        let mut builder = if config.smtp_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| InfrastructureError::Email(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        }
        .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(
            "SMTP sender configured for {}:{} (tls: {})",
            config.smtp_host, config.smtp_port, config.smtp_tls
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, to: &str, subject: &str, body: &str) -> Result<Message, String> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("Failed to build message: {}", e))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let message = self.build_message(to, subject, body)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("SMTP send failed: {}", e))?;

        debug!(email = %mask_email(to), "Verification email handed to SMTP relay");
        Ok(())
    }
}
