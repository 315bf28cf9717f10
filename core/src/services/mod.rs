//! Business services containing domain logic and use cases.

pub mod clock;
pub mod rate_limit;
pub mod store;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use rate_limit::{RateLimitDecision, RateLimitPolicy, RateLimiter};
pub use store::{keys, Deadline, RecordStore, RecordStoreExt};
pub use verification::{
    CodeGenerator, EmailSender, RandomCodeGenerator, SessionIdGenerator,
    UuidSessionIdGenerator, VerificationService, VerificationServiceConfig,
};
