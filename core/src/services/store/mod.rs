//! Ephemeral record store contract
//!
//! Records are opaque byte values with a per-key TTL. Expired keys are
//! indistinguishable from keys that were never written. Every operation takes
//! a [`Deadline`] so one request's steps share a single time budget.

mod deadline;
pub mod keys;
mod traits;

pub use deadline::Deadline;
pub use traits::{RecordStore, RecordStoreExt};
