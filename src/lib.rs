//! rosterd - a small, self-hostable in-memory user record service

pub mod cli;
pub mod http;
pub mod observability;
pub mod pipeline;
pub mod store;
pub mod user;
