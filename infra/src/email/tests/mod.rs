//! Unit tests for email senders

use ea_core::services::verification::EmailSender;
use ea_shared::{EmailConfig, EmailProvider};

use crate::email::{create_email_sender, MockEmailSender, SmtpEmailSender};

#[tokio::test]
async fn test_mock_sender_records_messages() {
    let sender = MockEmailSender::new();

    sender.send("ada@example.com", "verification", "111111").await.unwrap();
    sender.send("ada@example.com", "verification", "222222").await.unwrap();
    sender.send("bob@example.com", "verification", "333333").await.unwrap();

    assert_eq!(sender.sent_count(), 3);
    assert_eq!(sender.last_body_for("ada@example.com").as_deref(), Some("222222"));
    assert_eq!(sender.sent()[2].to, "bob@example.com");
    assert_eq!(sender.last_body_for("eve@example.com"), None);
}

#[tokio::test]
async fn test_failing_mock_sender() {
    let sender = MockEmailSender::failing();

    assert!(sender.send("ada@example.com", "verification", "111111").await.is_err());
    assert_eq!(sender.sent_count(), 0);

    sender.set_failing(false);
    assert!(sender.send("ada@example.com", "verification", "111111").await.is_ok());
}

#[tokio::test]
async fn test_log_provider_accepts_everything() {
    let config = EmailConfig {
        provider: EmailProvider::Log,
        ..EmailConfig::default()
    };
    let sender = create_email_sender(&config).unwrap();

    assert!(sender.send("ada@example.com", "verification", "111111").await.is_ok());
}

#[tokio::test]
async fn test_smtp_sender_builds_with_defaults() {
    assert!(SmtpEmailSender::new(&EmailConfig::default()).is_ok());
}

#[tokio::test]
async fn test_smtp_sender_rejects_bad_from_address() {
    let config = EmailConfig {
        from: "not an address".to_string(),
        ..EmailConfig::default()
    };
    assert!(SmtpEmailSender::new(&config).is_err());
}

#[tokio::test]
async fn test_smtp_sender_rejects_bad_recipient() {
    let sender = SmtpEmailSender::new(&EmailConfig::default()).unwrap();

    let result = sender.send("not an address", "verification", "111111").await;

    assert!(result.unwrap_err().contains("Invalid recipient"));
}
