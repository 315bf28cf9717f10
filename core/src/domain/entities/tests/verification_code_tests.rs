//! Unit tests for verification code entity

use std::time::Duration;

use crate::domain::entities::pending_identity::{PendingIdentity, Purpose};
use crate::domain::entities::verification_code::{VerificationCode, CODE_LENGTH};
use crate::domain::value_objects::Registration;

fn identity() -> PendingIdentity {
    PendingIdentity::new(
        "0190d1c4b7a47c2e9d3f5a6b7c8d9e0f",
        Registration::new("Ada", "ada@example.com", "secret"),
        Purpose::Signup,
    )
}

#[test]
fn test_new_binds_to_identity() {
    let record = VerificationCode::new(&identity(), "123456", Duration::from_secs(60));

    assert_eq!(record.session_id, "0190d1c4b7a47c2e9d3f5a6b7c8d9e0f");
    assert_eq!(record.email, "ada@example.com");
    assert_eq!(record.expires_in(), Duration::from_secs(60));
    assert_eq!(record.code, "123456");
    assert!(record.belongs_to(&identity()));
}

#[test]
fn test_belongs_to_rejects_other_address() {
    let record = VerificationCode::new(&identity(), "123456", Duration::from_secs(60));
    let mut other = identity();
    other.email = "mallory@example.com".to_string();

    assert!(!record.belongs_to(&other));
}

#[test]
fn test_serialized_field_names() {
    let record = VerificationCode::new(&identity(), "654321", Duration::from_secs(60));
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["id"], "0190d1c4b7a47c2e9d3f5a6b7c8d9e0f");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["exp"], 60_000_000_000u64);
    assert_eq!(json["code"], "654321");
}

#[test]
fn test_well_formed_codes() {
    assert!(VerificationCode::is_well_formed("123456"));
    assert!(VerificationCode::is_well_formed("000000"));
    assert!(!VerificationCode::is_well_formed("12345"));
    assert!(!VerificationCode::is_well_formed("1234567"));
    assert!(!VerificationCode::is_well_formed("12a456"));
    assert!(!VerificationCode::is_well_formed("session:abc"));
    assert_eq!(CODE_LENGTH, 6);
}

#[test]
fn test_reads_nanosecond_lifetime() {
    let json = r#"{"id":"abc","email":"ada@example.com","exp":60000000000}"#;
    let record: VerificationCode = serde_json::from_str(json).unwrap();

    assert_eq!(record.expires_in(), Duration::from_secs(60));
    assert_eq!(record.code, "");
}
