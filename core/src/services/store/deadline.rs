use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::{StoreError, StoreResult};

/// Time budget shared by the store calls of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
}

impl Deadline {
    /// A deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
        }
    }

    pub fn instant(&self) -> Instant {
        self.expires_at
    }

    /// Time left, zero once passed
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Runs `operation` to completion or fails with `StoreError::Timeout`
    ///
    /// An already-passed deadline fails without polling the operation.
    pub async fn bound<F, T>(&self, operation: &str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        if self.is_expired() {
            return Err(StoreError::Timeout {
                operation: operation.to_string(),
            });
        }

        match tokio::time::timeout_at(self.expires_at, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                operation: operation.to_string(),
            }),
        }
    }
}
