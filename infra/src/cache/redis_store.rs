//! Redis-backed record store
//!
//! This module implements the `RecordStore` contract on top of a single
//! multiplexed Redis connection. Values are stored as raw bytes with a
//! millisecond TTL, and every command is bounded by the caller's deadline.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use ea_core::errors::{StoreError, StoreResult};
use ea_core::services::store::{Deadline, RecordStore};
use ea_shared::mask_url;

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Upper bound for the connect backoff
const MAX_RETRY_DELAY_MS: u64 = 5_000;

/// Attempts per command for transient failures, within the deadline
const COMMAND_ATTEMPTS: u32 = 3;

/// Delay between command attempts
const COMMAND_RETRY_DELAY: Duration = Duration::from_millis(50);

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Record store on a Redis multiplexed connection
#[derive(Clone)]
pub struct RedisRecordStore {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this store
    config: CacheConfig,
}

impl RedisRecordStore {
    /// Connect and verify the connection with a PING
    ///
    /// Connection failures are retried `connect_retries` times with backoff
    /// starting at `retry_delay_ms`. Zero retries means retry until a
    /// connection succeeds.
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Connecting record store to Redis at {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(&client, config.connect_retries, config.retry_delay_ms)
                .await?;

        info!("Redis record store ready");

        Ok(Self { connection, config })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    async fn create_connection_with_retry(
        client: &Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match Self::open_and_ping(client).await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if max_retries == 0 || attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}): {}. Retrying in {}ms...",
                        attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_retry_delay(delay, retry_delay_ms);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    async fn open_and_ping(client: &Client) -> RedisResult<MultiplexedConnection> {
        let mut connection = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut connection)
            .await?;
        Ok(connection)
    }

    /// Run one Redis command under the deadline, retrying transient errors
    async fn execute<F, T>(&self, name: &str, deadline: Deadline, operation: F) -> StoreResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let attempts = async {
            let mut attempt = 0;
            loop {
                attempt += 1;
                match operation(self.connection.clone()).await {
                    Ok(value) => return Ok(value),
                    Err(e) if attempt < COMMAND_ATTEMPTS && is_retriable_error(&e) => {
                        warn!(
                            "Redis {} failed (attempt {}/{}): {}. Retrying...",
                            name, attempt, COMMAND_ATTEMPTS, e
                        );
                        sleep(COMMAND_RETRY_DELAY).await;
                    }
                    Err(e) => {
                        error!("Redis {} failed after {} attempts: {}", name, attempt, e);
                        return Err(StoreError::Transport {
                            message: e.to_string(),
                        });
                    }
                }
            }
        };

        deadline.bound(name, attempts).await
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration, deadline: Deadline) -> StoreResult<()> {
        let key = self.config.make_key(key);
        let ttl_ms = ttl_millis(ttl);
        debug!("Setting key '{}' with ttl {}ms", key, ttl_ms);

        self.execute("put", deadline, |mut conn| {
            let key = key.clone();
            let value = value.clone();
            Box::pin(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("PX")
                    .arg(ttl_ms)
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
    }

    async fn get(&self, key: &str, deadline: Deadline) -> StoreResult<Vec<u8>> {
        let key = self.config.make_key(key);

        let value = self
            .execute("get", deadline, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.get::<_, Option<Vec<u8>>>(key).await })
            })
            .await?;

        value.ok_or(StoreError::NotFound { key })
    }

    async fn exists(&self, key: &str, deadline: Deadline) -> StoreResult<bool> {
        let key = self.config.make_key(key);

        self.execute("exists", deadline, |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
        deadline: Deadline,
    ) -> StoreResult<bool> {
        let key = self.config.make_key(key);
        let ttl_ms = ttl_millis(ttl);

        let reply = self
            .execute("put_if_absent", deadline, |mut conn| {
                let key = key.clone();
                let value = value.clone();
                Box::pin(async move {
                    redis::cmd("SET")
                        .arg(key)
                        .arg(value)
                        .arg("NX")
                        .arg("PX")
                        .arg(ttl_ms)
                        .query_async::<_, Option<String>>(&mut conn)
                        .await
                })
            })
            .await?;

        Ok(reply.is_some())
    }

    async fn delete(&self, key: &str, deadline: Deadline) -> StoreResult<bool> {
        let key = self.config.make_key(key);

        let removed = self
            .execute("delete", deadline, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await?;

        Ok(removed > 0)
    }

    async fn health_check(&self, deadline: Deadline) -> StoreResult<()> {
        let reply = self
            .execute("health_check", deadline, |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(StoreError::Transport {
                message: format!("unexpected PING reply: {}", reply),
            })
        }
    }
}

/// TTL in whole milliseconds; Redis rejects a zero expiry
pub(crate) fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Doubled connect delay, capped at the larger of the cap and the base delay
pub(crate) fn next_retry_delay(delay: u64, base_delay: u64) -> u64 {
    delay.saturating_mul(2).min(MAX_RETRY_DELAY_MS.max(base_delay))
}

/// Check if a Redis error is transient and the command should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}
