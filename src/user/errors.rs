//! # User Domain Errors
//!
//! Error types for validation and service operations. Nothing here knows
//! about HTTP; the boundary maps these to status codes.

use thiserror::Error;

/// Result type for service operations.
pub type UserResult<T> = Result<T, UserError>;

/// First violated validation rule for a candidate record.
///
/// Variants are ordered like the checks themselves; the validator
/// short-circuits, so callers always see the earliest violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No candidate was supplied at all.
    #[error("User data is required")]
    UserDataRequired,

    #[error("Username is required and cannot be empty")]
    UsernameRequired,

    #[error("Username cannot exceed 100 characters")]
    UsernameTooLong,

    #[error("Email is required and cannot be empty")]
    EmailRequired,

    #[error("Email format is invalid")]
    EmailInvalid,

    #[error("Age must be between 0 and 150")]
    AgeOutOfRange,

    #[error("Password is required and cannot be empty")]
    PasswordRequired,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
}

/// Failure of a service operation.
///
/// The reason only exists in the failure case; success carries the record
/// itself through `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// Candidate data violated a field rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced id is not in the store.
    #[error("User with ID {0} not found")]
    NotFound(u64),
}
