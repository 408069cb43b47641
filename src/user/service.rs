//! # User Service
//!
//! Orchestration layer applying validation around store operations. The
//! store is injected by the composition root; the service holds the only
//! long-lived handle handlers see.

use std::sync::Arc;

use crate::store::UserStore;

use super::errors::{UserError, UserResult};
use super::model::{User, UserPayload};
use super::validator::validate;

/// Service facade over the user store.
#[derive(Clone)]
pub struct UserService {
    store: Arc<UserStore>,
}

impl UserService {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }

    /// Snapshot of all records. Order is arbitrary.
    pub fn list_all(&self) -> Vec<User> {
        self.store.list()
    }

    pub fn get_by_id(&self, id: u64) -> Option<User> {
        self.store.get(id)
    }

    pub fn exists_by_id(&self, id: u64) -> bool {
        self.store.exists(id)
    }

    /// Validate the candidate, then create it with a fresh id.
    pub fn create(&self, payload: Option<UserPayload>) -> UserResult<User> {
        let candidate = validate(payload.as_ref())?;
        Ok(self.store.create(candidate))
    }

    /// Validate the candidate, then replace the record at `id`.
    ///
    /// Validation runs before the existence check, so invalid input is
    /// reported as a validation failure even for an absent id. Uniform
    /// cheap-first failure policy; documented in DESIGN.md.
    pub fn update(&self, id: u64, payload: Option<UserPayload>) -> UserResult<User> {
        let candidate = validate(payload.as_ref())?;
        self.store
            .update(id, candidate)
            .ok_or(UserError::NotFound(id))
    }

    pub fn delete(&self, id: u64) -> UserResult<()> {
        if self.store.delete(id) {
            Ok(())
        } else {
            Err(UserError::NotFound(id))
        }
    }
}
