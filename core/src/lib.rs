//! # Email Auth Core
//!
//! Core domain layer for the email verification backend.
//! This crate contains the ephemeral record store contract, the records kept
//! in it, the verification engine that reconciles them, the per-address rate
//! limiter, and the error types that form the foundation of the service.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
