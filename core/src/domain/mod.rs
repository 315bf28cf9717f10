//! Domain layer containing the ephemeral records and the values exchanged with callers.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use value_objects::*;
