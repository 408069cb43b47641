//! # Observability
//!
//! Structured logging for request handling and faults.

pub mod logger;

pub use logger::{Logger, Severity};
