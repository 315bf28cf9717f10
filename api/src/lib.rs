//! HTTP layer of the email verification backend
//!
//! Exposes the library surface used by the binary and by the integration
//! tests in `tests/`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
