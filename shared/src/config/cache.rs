//! Record store configuration module

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{env_opt, env_or};

/// Backend holding the ephemeral records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Redis server (default)
    #[default]
    Redis,
    /// Process-local map, for development and tests
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" | "in_memory" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Redis record store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Which backend holds the records
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Optional prefix prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Connection attempts before giving up (0 = retry forever)
    #[serde(default)]
    pub connect_retries: u32,

    /// Delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Seconds between sweeps of expired records in the memory backend (0 = never)
    #[serde(default = "default_purge_interval_seconds")]
    pub purge_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: String::from("redis://localhost:6379"),
            key_prefix: None,
            connect_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            purge_interval_seconds: default_purge_interval_seconds(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_or("CACHE_BACKEND", defaults.backend),
            url: env_opt("REDIS_URL").unwrap_or(defaults.url),
            key_prefix: env_opt("REDIS_KEY_PREFIX"),
            connect_retries: env_or("REDIS_CONNECT_RETRIES", defaults.connect_retries),
            retry_delay_ms: env_or("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
            purge_interval_seconds: env_or(
                "CACHE_PURGE_INTERVAL_SECONDS",
                defaults.purge_interval_seconds,
            ),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_purge_interval_seconds() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.backend, CacheBackend::Redis);
        assert_eq!(config.connect_retries, 0);
        assert_eq!(config.retry_delay_ms, 2000);
        assert_eq!(config.purge_interval_seconds, 60);
    }

    #[test]
    fn test_cache_config_with_prefix() {
        let config = CacheConfig::new("redis://cache:6379").with_prefix("email-auth");
        assert_eq!(config.make_key("identity:abc"), "email-auth:identity:abc");
    }

    #[test]
    fn test_cache_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("code:123456"), "code:123456");
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("memory".parse::<CacheBackend>().unwrap(), CacheBackend::Memory);
        assert_eq!("REDIS".parse::<CacheBackend>().unwrap(), CacheBackend::Redis);
        assert!("sqlite".parse::<CacheBackend>().is_err());
    }
}
