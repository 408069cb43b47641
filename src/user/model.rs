//! # User Model
//!
//! The stored user record and the wire-shaped candidate payload.

use serde::{Deserialize, Serialize};

/// A user record as held by the store and returned to clients.
///
/// Every record in the store satisfies the validator's constraints; the
/// only way to put one there is through a validated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store's allocator. Never
    /// client-supplied on create; forced to the path id on update.
    pub id: u64,

    /// Display name, non-blank, at most 100 characters.
    pub username: String,

    /// Syntactically valid address (local-part@domain).
    pub email: String,

    /// Age in years, 0..=150.
    pub age: i32,

    /// Stored and returned exactly as submitted. Plaintext storage is a
    /// known deficiency kept for contract compatibility; hashing would
    /// change what clients observe.
    pub password: String,
}

/// Candidate user data as it arrives on the wire.
///
/// All fields are optional so that presence checks belong to the validator
/// rather than to deserialization. Unknown fields, including a
/// client-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub age: Option<i32>,

    #[serde(default)]
    pub password: Option<String>,
}
