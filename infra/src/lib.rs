//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the email verification
//! backend. It provides concrete implementations of the collaborator traits
//! declared in `ea_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis-backed and in-memory record stores
//! - **Email**: SMTP delivery via lettre, plus log-only and recording senders

// Re-export core types for convenience
pub use ea_core::errors::*;

/// Cache module - record store implementations
pub mod cache;

/// Email module - verification code delivery
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Email transport error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
