//! Cache module for the ephemeral record store
//!
//! This module provides the Redis-backed store used in deployments and an
//! in-process store for development and tests. Both honour per-key TTLs.

pub mod memory_store;
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use memory_store::InMemoryRecordStore;
pub use redis_store::RedisRecordStore;

// Re-export commonly used types
pub use ea_shared::config::cache::CacheConfig;
