//! Unit tests for the Redis record store

use redis::{ErrorKind, RedisError};
use std::time::Duration;

use crate::cache::redis_store::{is_retriable_error, next_retry_delay, ttl_millis};
use crate::cache::{CacheConfig, RedisRecordStore};

#[test]
fn test_is_retriable_error() {
    // IO errors should be retriable
    let io_error = RedisError::from(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Connection refused",
    ));
    assert!(is_retriable_error(&io_error));

    // Type errors should not be retriable
    let type_error = RedisError::from((ErrorKind::TypeError, "Invalid type"));
    assert!(!is_retriable_error(&type_error));
}

#[test]
fn test_ttl_millis() {
    assert_eq!(ttl_millis(Duration::from_secs(60)), 60_000);
    assert_eq!(ttl_millis(Duration::from_micros(10)), 1);
    assert_eq!(ttl_millis(Duration::ZERO), 1);
}

#[test]
fn test_next_retry_delay() {
    assert_eq!(next_retry_delay(500, 500), 1_000);
    assert_eq!(next_retry_delay(4_000, 500), 5_000);
    // A base delay above the cap is kept as is
    assert_eq!(next_retry_delay(8_000, 8_000), 8_000);
    // Very large delays saturate instead of overflowing
    assert_eq!(next_retry_delay(u64::MAX, u64::MAX), u64::MAX);
    assert_eq!(next_retry_delay(u64::MAX / 2 + 1, 500), 5_000);
}

#[tokio::test]
async fn test_connect_with_invalid_url() {
    let config = CacheConfig::new("invalid://url");

    let result = RedisRecordStore::connect(config).await;
    assert!(result.is_err());
}
