//! Shared utilities and common types for the email-auth server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The uniform error response structure and error codes
//! - Masking helpers for log output

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AdmissionMode, AppConfig, CacheBackend, CacheConfig, CodeKeyStrategy, CorsConfig,
    EmailConfig, EmailProvider, Environment, RateLimitConfig, ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{mask_email, mask_url};
