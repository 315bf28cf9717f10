//! Integration tests for the Redis record store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p ea_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use ea_core::domain::value_objects::Registration;
use ea_core::services::store::{Deadline, RecordStore};
use ea_core::services::{RateLimitDecision, RateLimitPolicy, RateLimiter};
use ea_core::services::{VerificationService, VerificationServiceConfig};
use ea_infra::cache::{CacheConfig, RedisRecordStore};
use ea_infra::email::MockEmailSender;

fn config() -> CacheConfig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let mut config = CacheConfig::new(url).with_prefix(format!("test-{}", std::process::id()));
    config.connect_retries = 1;
    config
}

fn deadline() -> Deadline {
    Deadline::after(Duration::from_secs(5))
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let store = RedisRecordStore::connect(config()).await;
    assert!(store.is_ok(), "Failed to connect to Redis");
    assert!(store.unwrap().health_check(deadline()).await.is_ok());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_put_get_delete() {
    let store = RedisRecordStore::connect(config()).await.unwrap();
    let key = "identity:integration";

    store.put(key, b"payload".to_vec(), Duration::from_secs(60), deadline()).await.unwrap();
    assert_eq!(store.get(key, deadline()).await.unwrap(), b"payload");
    assert!(store.exists(key, deadline()).await.unwrap());

    assert!(store.delete(key, deadline()).await.unwrap());
    assert!(store.get(key, deadline()).await.unwrap_err().is_not_found());
    assert!(!store.delete(key, deadline()).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_expiry() {
    let store = RedisRecordStore::connect(config()).await.unwrap();
    let key = "code:expiry";

    store.put(key, b"x".to_vec(), Duration::from_secs(1), deadline()).await.unwrap();
    assert!(store.exists(key, deadline()).await.unwrap());

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(!store.exists(key, deadline()).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_put_if_absent() {
    let store = RedisRecordStore::connect(config()).await.unwrap();
    let key = "ratelimit:put-if-absent";
    let _ = store.delete(key, deadline()).await;

    assert!(store.put_if_absent(key, Vec::new(), Duration::from_secs(60), deadline()).await.unwrap());
    assert!(!store.put_if_absent(key, Vec::new(), Duration::from_secs(60), deadline()).await.unwrap());

    store.delete(key, deadline()).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_rate_limiter_window() {
    let store = Arc::new(RedisRecordStore::connect(config()).await.unwrap());
    let _ = store.delete("ratelimit:203.0.113.9", deadline()).await;
    let policy = RateLimitPolicy {
        window: Duration::from_secs(1),
        ..RateLimitPolicy::default()
    };
    let limiter = RateLimiter::new(store, policy);

    assert_eq!(limiter.check("203.0.113.9").await.unwrap(), RateLimitDecision::Admitted);
    assert_eq!(limiter.check("203.0.113.9").await.unwrap(), RateLimitDecision::Limited);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(limiter.check("203.0.113.9").await.unwrap(), RateLimitDecision::Admitted);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_signup_and_verify_round_trip() {
    let store = Arc::new(RedisRecordStore::connect(config()).await.unwrap());
    let email = Arc::new(MockEmailSender::new());
    let service = VerificationService::new(store, email.clone(), VerificationServiceConfig::default());

    let issued = service
        .signup(Registration::new("Ada", "ada@example.com", "secret"))
        .await
        .unwrap();
    let code = email.last_body_for("ada@example.com").unwrap();

    let outcome = service.verify(&issued.session_id, &code).await.unwrap();
    assert_eq!(outcome.message(), "user created");
}
