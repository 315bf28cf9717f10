//! In-process record store
//!
//! Keeps records in a mutex-guarded map with an absolute expiry per key.
//! Expired entries are treated as absent on every read. They are dropped
//! when their key is touched, by [`InMemoryRecordStore::purge_expired`], or
//! by the background sweep from [`InMemoryRecordStore::spawn_reaper`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use ea_core::errors::{StoreError, StoreResult};
use ea_core::services::clock::{Clock, SystemClock};
use ea_core::services::store::{Deadline, RecordStore};

struct Entry {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// Record store living in process memory
///
/// Not shared between processes, so it only suits single-instance
/// deployments, local development and tests.
pub struct InMemoryRecordStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store whose TTLs follow `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.lock().values().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired record, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Purge expired records every `interval` on a background task
    ///
    /// The task holds only a weak reference and exits once the store is
    /// dropped.
    pub fn spawn_reaper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store = Arc::downgrade(self);
        let period = interval.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let removed = store.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed = removed, "Purged expired records");
                }
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn expiry(&self, ttl: Duration) -> DateTime<Utc> {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500));
        self.clock.now() + ttl
    }

    fn check_deadline(operation: &str, deadline: &Deadline) -> StoreResult<()> {
        if deadline.is_expired() {
            return Err(StoreError::Timeout {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Live value under `key`, removing it if it has expired
    fn live<'a>(
        entries: &'a mut HashMap<String, Entry>,
        key: &str,
        now: DateTime<Utc>,
    ) -> Option<&'a Entry> {
        let expired = matches!(entries.get(key), Some(entry) if entry.expires_at <= now);
        if expired {
            entries.remove(key);
        }
        entries.get(key)
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration, deadline: Deadline) -> StoreResult<()> {
        Self::check_deadline("put", &deadline)?;
        let expires_at = self.expiry(ttl);
        self.lock().insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str, deadline: Deadline) -> StoreResult<Vec<u8>> {
        Self::check_deadline("get", &deadline)?;
        let now = self.clock.now();
        let mut entries = self.lock();
        Self::live(&mut entries, key, now)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    async fn exists(&self, key: &str, deadline: Deadline) -> StoreResult<bool> {
        Self::check_deadline("exists", &deadline)?;
        let now = self.clock.now();
        let mut entries = self.lock();
        Ok(Self::live(&mut entries, key, now).is_some())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
        deadline: Deadline,
    ) -> StoreResult<bool> {
        Self::check_deadline("put_if_absent", &deadline)?;
        let now = self.clock.now();
        let expires_at = self.expiry(ttl);
        let mut entries = self.lock();
        if Self::live(&mut entries, key, now).is_some() {
            return Ok(false);
        }
        entries.insert(key.to_string(), Entry { value, expires_at });
        Ok(true)
    }

    async fn delete(&self, key: &str, deadline: Deadline) -> StoreResult<bool> {
        Self::check_deadline("delete", &deadline)?;
        let now = self.clock.now();
        let mut entries = self.lock();
        Ok(entries
            .remove(key)
            .map(|entry| entry.expires_at > now)
            .unwrap_or(false))
    }
}
