//! Rate limiting configuration module

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{env_flag, env_or};

/// How the admission marker is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionMode {
    /// Probe for the marker, then write it. Two round trips, racy under
    /// concurrent requests from one address.
    #[default]
    ProbeThenSet,
    /// Single set-if-absent round trip.
    Atomic,
}

impl FromStr for AdmissionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "probe_then_set" | "probe" => Ok(AdmissionMode::ProbeThenSet),
            "atomic" | "set_nx" => Ok(AdmissionMode::Atomic),
            _ => Err(format!("Invalid admission mode: {}", s)),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Lifetime of the per-address marker in seconds
    pub window_seconds: u64,

    /// Deadline for the marker probe and write
    pub timeout_seconds: u64,

    /// Marker write mode
    #[serde(default)]
    pub mode: AdmissionMode,

    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            window_seconds: 60,
            timeout_seconds: 10,
            mode: AdmissionMode::ProbeThenSet,
            trust_proxy_headers: false,
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_flag("RATE_LIMIT_ENABLED", defaults.enabled),
            window_seconds: env_or("RATE_LIMIT_WINDOW_SECONDS", defaults.window_seconds),
            timeout_seconds: env_or("RATE_LIMIT_TIMEOUT_SECONDS", defaults.timeout_seconds),
            mode: env_or("RATE_LIMIT_MODE", defaults.mode),
            trust_proxy_headers: env_flag("TRUST_PROXY_HEADERS", defaults.trust_proxy_headers),
        }
    }

    /// Configuration with rate limiting turned off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.window_seconds, 60);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.mode, AdmissionMode::ProbeThenSet);
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn test_disabled() {
        assert!(!RateLimitConfig::disabled().enabled);
    }

    #[test]
    fn test_admission_mode_parsing() {
        assert_eq!("atomic".parse::<AdmissionMode>().unwrap(), AdmissionMode::Atomic);
        assert_eq!(
            "probe-then-set".parse::<AdmissionMode>().unwrap(),
            AdmissionMode::ProbeThenSet
        );
        assert!("token_bucket".parse::<AdmissionMode>().is_err());
    }
}
