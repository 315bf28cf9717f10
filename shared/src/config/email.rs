//! Email delivery configuration module

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{env_flag, env_opt, env_or};

/// How verification codes leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Deliver through an SMTP relay
    #[default]
    Smtp,
    /// Only write the message to the log (development)
    Log,
}

impl FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "log" | "mock" => Ok(EmailProvider::Log),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery provider
    #[serde(default)]
    pub provider: EmailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP username, if the relay requires authentication
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[serde(default, skip_serializing)]
    pub smtp_password: Option<String>,

    /// Upgrade the connection with STARTTLS
    #[serde(default)]
    pub smtp_tls: bool,

    /// Sender address
    pub from: String,

    /// Subject line of verification emails
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Smtp,
            smtp_host: String::from("mailhog"),
            smtp_port: 1025,
            smtp_username: None,
            smtp_password: None,
            smtp_tls: false,
            from: String::from("noreply@email-auth.local"),
            subject: String::from("verification"),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_or("EMAIL_PROVIDER", defaults.provider),
            smtp_host: env_opt("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: env_or("SMTP_PORT", defaults.smtp_port),
            smtp_username: env_opt("SMTP_USERNAME"),
            smtp_password: env_opt("SMTP_PASSWORD"),
            smtp_tls: env_flag("SMTP_TLS", defaults.smtp_tls),
            from: env_opt("EMAIL_FROM").unwrap_or(defaults.from),
            subject: env_opt("EMAIL_SUBJECT").unwrap_or(defaults.subject),
        }
    }

    /// Whether credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.smtp_username.is_some() && self.smtp_password.is_some()
    }
}
