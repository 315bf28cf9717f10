//! Domain entities persisted in the ephemeral record store.

pub mod pending_identity;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use pending_identity::{PendingIdentity, Purpose};
pub use verification_code::{VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN};
