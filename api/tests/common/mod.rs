//! Shared fixtures for the route tests
#![allow(dead_code)]

use actix_web::web;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ea_api::AppState;
use ea_core::services::{
    ManualClock, RateLimitPolicy, RateLimiter, VerificationService, VerificationServiceConfig,
};
use ea_infra::cache::InMemoryRecordStore;
use ea_infra::email::MockEmailSender;

pub type TestState = AppState<InMemoryRecordStore, MockEmailSender>;

/// In-memory store, recording sender and a clock the test controls
pub struct TestContext {
    pub store: Arc<InMemoryRecordStore>,
    pub email: Arc<MockEmailSender>,
    pub clock: ManualClock,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_policy(RateLimitPolicy::default())
    }

    pub fn without_rate_limit() -> Self {
        Self::with_policy(RateLimitPolicy {
            enabled: false,
            ..RateLimitPolicy::default()
        })
    }

    pub fn with_policy(policy: RateLimitPolicy) -> Self {
        let clock = ManualClock::default();
        let store = Arc::new(InMemoryRecordStore::with_clock(Arc::new(clock.clone())));
        let email = Arc::new(MockEmailSender::new());

        let verification_service = Arc::new(VerificationService::new(
            store.clone(),
            email.clone(),
            VerificationServiceConfig::default(),
        ));
        let rate_limiter = Arc::new(RateLimiter::new(store.clone(), policy));

        Self {
            store,
            email,
            clock,
            state: web::Data::new(AppState::new(verification_service, rate_limiter)),
        }
    }

    /// Move every record TTL forward by `secs`
    pub fn advance(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
    }
}

pub fn peer(ip: &str) -> SocketAddr {
    format!("{}:40000", ip).parse().unwrap()
}
