//! Verification service module for email-based verification
//!
//! This module provides the two-record verification handshake:
//! - Pending identity creation for signup and signin requests
//! - Code generation, storage and delivery by email
//! - Code re-issue for an existing session
//! - Verification that reconciles the identity and code records

mod config;
mod generators;
mod service;
mod traits;


pub use config::VerificationServiceConfig;
pub use generators::{RandomCodeGenerator, UuidSessionIdGenerator};
pub use service::VerificationService;
pub use traits::{CodeGenerator, EmailSender, SessionIdGenerator};
