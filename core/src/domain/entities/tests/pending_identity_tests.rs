//! Unit tests for pending identity entity

use crate::domain::entities::pending_identity::{PendingIdentity, Purpose};
use crate::domain::value_objects::Registration;

fn registration() -> Registration {
    Registration::new("Ada", "ada@example.com", "hunter2")
}

#[test]
fn test_new_copies_registration() {
    let identity = PendingIdentity::new("abc", registration(), Purpose::Signin);

    assert_eq!(identity.id, "abc");
    assert_eq!(identity.name, "Ada");
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.password, "hunter2");
    assert_eq!(identity.purpose, Purpose::Signin);
}

#[test]
fn test_serialized_field_names() {
    let identity = PendingIdentity::new("abc", registration(), Purpose::Signup);
    let json = serde_json::to_value(&identity).unwrap();

    assert_eq!(json["id"], "abc");
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["password"], "hunter2");
    assert_eq!(json["purpose"], "signup");
}

#[test]
fn test_missing_purpose_defaults_to_signup() {
    let raw = r#"{"id":"abc","name":"Ada","email":"ada@example.com","password":"x"}"#;
    let identity: PendingIdentity = serde_json::from_str(raw).unwrap();
    assert_eq!(identity.purpose, Purpose::Signup);
}

#[test]
fn test_unknown_purpose_is_tolerated() {
    let raw = r#"{"id":"abc","name":"Ada","email":"a@b.c","password":"x","purpose":"reset"}"#;
    let identity: PendingIdentity = serde_json::from_str(raw).unwrap();
    assert_eq!(identity.purpose, Purpose::Other);
}

#[test]
fn test_debug_redacts_password() {
    let identity = PendingIdentity::new("abc", registration(), Purpose::Signup);
    let rendered = format!("{:?}", identity);

    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
    assert!(!format!("{:?}", registration()).contains("hunter2"));
}
