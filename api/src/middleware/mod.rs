pub mod cors;
pub mod rate_limit;

pub use cors::create_cors;
pub use rate_limit::{client_address, RateLimit};
