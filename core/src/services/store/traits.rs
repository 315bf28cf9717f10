use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::Deadline;
use crate::errors::{StoreError, StoreResult};

/// Key/value store with per-key expiry
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes `value` under `key`, replacing any previous value and TTL
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration, deadline: Deadline)
        -> StoreResult<()>;

    /// Reads the value under `key`; `StoreError::NotFound` when absent or expired
    async fn get(&self, key: &str, deadline: Deadline) -> StoreResult<Vec<u8>>;

    /// Whether a live value exists under `key`
    async fn exists(&self, key: &str, deadline: Deadline) -> StoreResult<bool>;

    /// Writes only when no live value exists; true when this call wrote
    async fn put_if_absent(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
        deadline: Deadline,
    ) -> StoreResult<bool>;

    /// Removes `key`; true when a live value was removed by this call
    async fn delete(&self, key: &str, deadline: Deadline) -> StoreResult<bool>;

    /// Checks that the backing medium answers
    async fn health_check(&self, deadline: Deadline) -> StoreResult<()> {
        if deadline.is_expired() {
            return Err(StoreError::Timeout {
                operation: "health_check".to_string(),
            });
        }
        Ok(())
    }
}

/// JSON helpers layered on any [`RecordStore`]
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    async fn put_json<T>(&self, key: &str, value: &T, ttl: Duration, deadline: Deadline)
        -> StoreResult<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })?;
        self.put(key, bytes, ttl, deadline).await
    }

    async fn get_json<T>(&self, key: &str, deadline: Deadline) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.get(key, deadline).await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
            message: format!("{}: {}", key, e),
        })
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
