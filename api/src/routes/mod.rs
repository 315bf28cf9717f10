pub mod auth;
pub mod health;

pub use health::health_check;
