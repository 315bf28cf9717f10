//! Verification route handlers
//!
//! - `/signup` and `/signin` create a pending identity and email its first code
//! - `/newcode` emails a fresh code for an existing session
//! - `/verify` checks a code against its session

pub mod new_code;
pub mod register;
pub mod verify;

pub use new_code::new_code;
pub use register::{signin, signup};
pub use verify::verify;
