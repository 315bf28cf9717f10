//! Verification engine configuration module

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{env_flag, env_or};

/// How verification code records are keyed in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKeyStrategy {
    /// Key the record by the code value itself. Concurrent codes that collide
    /// overwrite each other.
    #[default]
    CodeValue,
    /// Key the record by the owning session id and compare the code as a field.
    SessionScoped,
}

impl FromStr for CodeKeyStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "code_value" | "code" => Ok(CodeKeyStrategy::CodeValue),
            "session_scoped" | "session" => Ok(CodeKeyStrategy::SessionScoped),
            _ => Err(format!("Invalid code key strategy: {}", s)),
        }
    }
}

/// Lifetimes and switches of the verification engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of a pending identity in seconds
    pub identity_ttl_seconds: u64,

    /// Lifetime of an issued code in seconds
    pub code_ttl_seconds: u64,

    /// Deadline shared by all store and delivery calls of one request
    pub operation_timeout_seconds: u64,

    /// Keying of code records
    #[serde(default)]
    pub code_key_strategy: CodeKeyStrategy,

    /// Consume the code record on successful verification
    #[serde(default)]
    pub single_use: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            identity_ttl_seconds: 20 * 60,
            code_ttl_seconds: 60,
            operation_timeout_seconds: 30,
            code_key_strategy: CodeKeyStrategy::CodeValue,
            single_use: false,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            identity_ttl_seconds: env_or("IDENTITY_TTL_SECONDS", defaults.identity_ttl_seconds),
            code_ttl_seconds: env_or("CODE_TTL_SECONDS", defaults.code_ttl_seconds),
            operation_timeout_seconds: env_or(
                "OPERATION_TIMEOUT_SECONDS",
                defaults.operation_timeout_seconds,
            ),
            code_key_strategy: env_or("CODE_KEY_STRATEGY", defaults.code_key_strategy),
            single_use: env_flag("VERIFY_SINGLE_USE", defaults.single_use),
        }
    }
}
