use std::sync::Arc;
use std::time::Duration;

use ea_shared::{AdmissionMode, RateLimitConfig};

use crate::errors::DomainResult;
use crate::services::store::{keys, Deadline, RecordStore};

/// Settings of a [`RateLimiter`]
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    pub enabled: bool,
    /// How long an admitted address stays blocked
    pub window: Duration,
    /// Budget for the store calls of one check
    pub timeout: Duration,
    pub mode: AdmissionMode,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::from(&RateLimitConfig::default())
    }
}

impl From<&RateLimitConfig> for RateLimitPolicy {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            window: Duration::from_secs(config.window_seconds),
            timeout: Duration::from_secs(config.timeout_seconds),
            mode: config.mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Admitted,
    Limited,
}

impl RateLimitDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, RateLimitDecision::Admitted)
    }
}

/// Admits at most one request per address per window
///
/// A limited request does not extend the window. In `ProbeThenSet` mode two
/// concurrent first requests from one address may both be admitted.
pub struct RateLimiter<S: RecordStore + ?Sized> {
    store: Arc<S>,
    policy: RateLimitPolicy,
}

impl<S: RecordStore + ?Sized> RateLimiter<S> {
    pub fn new(store: Arc<S>, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Decide whether a request from `address` may proceed
    ///
    /// Store failures are returned as errors so the caller can fail closed.
    pub async fn check(&self, address: &str) -> DomainResult<RateLimitDecision> {
        if !self.policy.enabled {
            return Ok(RateLimitDecision::Admitted);
        }

        let deadline = Deadline::after(self.policy.timeout);
        let key = keys::rate_limit_key(address);

        let admitted = match self.policy.mode {
            AdmissionMode::ProbeThenSet => {
                if self.store.exists(&key, deadline).await? {
                    false
                } else {
                    self.store
                        .put(&key, Vec::new(), self.policy.window, deadline)
                        .await?;
                    true
                }
            }
            AdmissionMode::Atomic => {
                self.store
                    .put_if_absent(&key, Vec::new(), self.policy.window, deadline)
                    .await?
            }
        };

        if admitted {
            tracing::debug!(address = address, event = "request_admitted", "Request admitted");
            Ok(RateLimitDecision::Admitted)
        } else {
            tracing::warn!(
                address = address,
                window_seconds = self.policy.window.as_secs(),
                event = "rate_limit_exceeded",
                "Request rate limit exceeded"
            );
            Ok(RateLimitDecision::Limited)
        }
    }
}
