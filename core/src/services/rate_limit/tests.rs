use std::sync::Arc;
use std::time::Duration;

use ea_shared::AdmissionMode;

use super::{RateLimitDecision, RateLimitPolicy, RateLimiter};
use crate::errors::{DomainError, StoreError};
use crate::services::clock::ManualClock;
use crate::services::verification::tests::mocks::MockRecordStore;

fn limiter(mode: AdmissionMode) -> (RateLimiter<MockRecordStore>, Arc<MockRecordStore>, ManualClock) {
    let clock = ManualClock::default();
    let store = Arc::new(MockRecordStore::new(clock.clone()));
    let policy = RateLimitPolicy {
        mode,
        ..RateLimitPolicy::default()
    };
    (RateLimiter::new(store.clone(), policy), store, clock)
}

#[tokio::test]
async fn test_first_request_admitted_second_limited() {
    for mode in [AdmissionMode::ProbeThenSet, AdmissionMode::Atomic] {
        let (limiter, store, _clock) = limiter(mode);

        assert_eq!(limiter.check("10.0.0.1").await.unwrap(), RateLimitDecision::Admitted);
        assert_eq!(limiter.check("10.0.0.1").await.unwrap(), RateLimitDecision::Limited);
        assert_eq!(store.live_keys(), vec!["ratelimit:10.0.0.1".to_string()]);
    }
}

#[tokio::test]
async fn test_addresses_are_independent() {
    let (limiter, _store, _clock) = limiter(AdmissionMode::ProbeThenSet);

    assert!(limiter.check("10.0.0.1").await.unwrap().is_admitted());
    assert!(limiter.check("10.0.0.2").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_window_elapses() {
    let (limiter, _store, clock) = limiter(AdmissionMode::ProbeThenSet);

    assert!(limiter.check("10.0.0.1").await.unwrap().is_admitted());
    clock.advance(Duration::from_secs(59));
    assert_eq!(limiter.check("10.0.0.1").await.unwrap(), RateLimitDecision::Limited);
    clock.advance(Duration::from_secs(2));
    assert!(limiter.check("10.0.0.1").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_limited_request_does_not_extend_window() {
    let (limiter, _store, clock) = limiter(AdmissionMode::Atomic);

    assert!(limiter.check("10.0.0.1").await.unwrap().is_admitted());
    clock.advance(Duration::from_secs(50));
    assert!(!limiter.check("10.0.0.1").await.unwrap().is_admitted());
    clock.advance(Duration::from_secs(11));
    assert!(limiter.check("10.0.0.1").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_disabled_limiter_never_touches_store() {
    let clock = ManualClock::default();
    let store = Arc::new(MockRecordStore::new(clock));
    let policy = RateLimitPolicy {
        enabled: false,
        ..RateLimitPolicy::default()
    };
    let limiter = RateLimiter::new(store.clone(), policy);

    for _ in 0..3 {
        assert!(limiter.check("10.0.0.1").await.unwrap().is_admitted());
    }
    assert_eq!(store.operation_count(), 0);
}

#[tokio::test]
async fn test_store_failure_is_an_error() {
    let (limiter, store, _clock) = limiter(AdmissionMode::ProbeThenSet);
    store.fail(true);

    match limiter.check("10.0.0.1").await {
        Err(DomainError::Store(StoreError::Transport { .. })) => {}
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[test]
fn test_policy_defaults() {
    let policy = RateLimitPolicy::default();
    assert!(policy.enabled);
    assert_eq!(policy.window, Duration::from_secs(60));
    assert_eq!(policy.timeout, Duration::from_secs(10));
    assert_eq!(policy.mode, AdmissionMode::ProbeThenSet);
}
