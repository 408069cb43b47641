//! # User Store
//!
//! Concurrency-safe keyed collection of user records.
//!
//! Backed by a sharded concurrent map: reads never block other reads,
//! writes to different keys only contend within a shard, and writes to the
//! same key are serialized by the shard lock. The map is private; every
//! mutation goes through this type and nothing outside it can hold a
//! reference into the collection.

pub mod allocator;

use dashmap::DashMap;

pub use allocator::IdAllocator;

use crate::user::{NewUser, User};

/// The in-memory record store. Owns the record map and the id counter,
/// the only shared mutable state in the service.
#[derive(Debug)]
pub struct UserStore {
    users: DashMap<u64, User>,
    allocator: IdAllocator,
}

impl UserStore {
    /// Empty store; ids start at 1.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            allocator: IdAllocator::new(),
        }
    }

    /// Store pre-populated with records carrying their own ids. The
    /// allocator continues after the highest seed id.
    pub fn from_seed(seed: impl IntoIterator<Item = User>) -> Self {
        let users = DashMap::new();
        let mut highest = 0;
        for user in seed {
            highest = highest.max(user.id);
            users.insert(user.id, user);
        }
        Self {
            users,
            allocator: IdAllocator::starting_after(highest),
        }
    }

    /// The canonical startup seed: Alice, Bob and Charlie with ids 1..=3.
    pub fn with_seed_users() -> Self {
        let seed = [
            ("Alice", "alice@example.com", 30),
            ("Bob", "bob@example.com", 25),
            ("Charlie", "charlie@example.com", 35),
        ];
        Self::from_seed(seed.into_iter().enumerate().map(
            |(i, (username, email, age))| User {
                id: i as u64 + 1,
                username: username.to_string(),
                email: email.to_string(),
                age,
                password: "password123".to_string(),
            },
        ))
    }

    /// Snapshot of current records. Each record is cloned under its shard
    /// lock, so a half-written record is never observed; the snapshot as a
    /// whole is not atomic and its order is arbitrary.
    pub fn list(&self) -> Vec<User> {
        self.users.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    /// Store a validated candidate under a fresh id and return the stored
    /// copy. Allocator ids are fresh by construction, so this never
    /// overwrites.
    pub fn create(&self, candidate: NewUser) -> User {
        let id = self.allocator.next_id();
        let user = User {
            id,
            username: candidate.username,
            email: candidate.email,
            age: candidate.age,
            password: candidate.password,
        };
        let previous = self.users.insert(id, user.clone());
        debug_assert!(previous.is_none(), "allocator returned an id already in use");
        user
    }

    /// Replace the record at `id` with the candidate, forcing its id to
    /// `id`. Returns `None` without mutating when the id is absent. The
    /// replacement happens under the shard's write lock, so concurrent
    /// readers see either the old or the new record, never a mix, and
    /// racing updates resolve to a single winner.
    pub fn update(&self, id: u64, candidate: NewUser) -> Option<User> {
        let mut entry = self.users.get_mut(&id)?;
        let user = User {
            id,
            username: candidate.username,
            email: candidate.email,
            age: candidate.age,
            password: candidate.password,
        };
        *entry = user.clone();
        Some(user)
    }

    /// Remove the record at `id`. Returns whether a record was present;
    /// deleting an absent id is not an error.
    pub fn delete(&self, id: u64) -> bool {
        self.users.remove(&id).is_some()
    }

    pub fn exists(&self, id: u64) -> bool {
        self.users.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
