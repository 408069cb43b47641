//! # HTTP Boundary
//!
//! Router, handlers, configuration and the error-to-status mapping. This
//! is the only layer aware of transport concerns.

pub mod config;
pub mod errors;
pub mod server;
pub mod user_routes;

pub use config::{ConfigError, Environment, ServerConfig};
pub use errors::ApiError;
pub use server::HttpServer;
pub use user_routes::{user_routes, UserState};
