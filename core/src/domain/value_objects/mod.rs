//! Value objects representing immutable domain concepts.

pub mod registration;
pub mod verification_outcome;

// Re-export commonly used types
pub use registration::Registration;
pub use verification_outcome::{
    IssuedCode, IssuedIdentity, VerificationOutcome, SIGNIN_VERIFIED_MESSAGE,
    SIGNUP_VERIFIED_MESSAGE,
};
