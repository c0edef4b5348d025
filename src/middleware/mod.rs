//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{auth_middleware, AuthenticatedEditor};
pub use logging::logging_middleware;
