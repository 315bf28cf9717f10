//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Record store backend and Redis connection settings
//! - `email` - SMTP delivery of verification codes
//! - `environment` - Environment detection
//! - `rate_limit` - Per-address admission gate
//! - `server` - HTTP server and CORS
//! - `verification` - Record lifetimes and verification hardening switches

pub mod cache;
pub mod email;
pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

// Re-export commonly used types
pub use cache::{CacheBackend, CacheConfig};
pub use email::{EmailConfig, EmailProvider};
pub use environment::Environment;
pub use rate_limit::{AdmissionMode, RateLimitConfig};
pub use server::{CorsConfig, ServerConfig};
pub use verification::{CodeKeyStrategy, VerificationConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Record store configuration
    pub cache: CacheConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Verification engine configuration
    pub verification: VerificationConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let cors = if environment.is_production() {
            CorsConfig::from_env()
        } else {
            CorsConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            verification: VerificationConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            cors,
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag; accepts `1/0`, `true/false`, `yes/no`, `on/off`.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

/// Read an optional, non-empty string variable.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
