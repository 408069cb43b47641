//! # User Domain
//!
//! User record model, candidate validation and the orchestration service.

pub mod errors;
pub mod model;
pub mod service;
pub mod validator;

pub use errors::{UserError, UserResult, ValidationError};
pub use model::{User, UserPayload};
pub use service::UserService;
pub use validator::{validate, NewUser};
