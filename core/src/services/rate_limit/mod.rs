//! Per-address admission control backed by the record store
//!
//! One request per client address per window. A marker record with the
//! window as its TTL is the only state.

mod limiter;

#[cfg(test)]
mod tests;

pub use limiter::{RateLimitDecision, RateLimitPolicy, RateLimiter};
