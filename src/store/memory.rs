//! In-memory user store backed by a concurrent map.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::UserStore;
use crate::error::{StoreError, ValidationError};
use crate::models::{User, UserId};

/// Thread-safe in-memory [`UserStore`].
///
/// All single-key operations go through DashMap's sharded locks, so they are
/// atomic per key while operations on different keys proceed in parallel.
/// Records live for the process lifetime only.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<UserId, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }
}

impl UserStore for InMemoryUserStore {
    fn create(&self, name: &str, email: &str) -> Result<User, ValidationError> {
        let user = User::new(UserId::random(), name, email)?;
        self.users.insert(user.id(), user.clone());
        Ok(user)
    }

    fn find_by_id(&self, id: &UserId) -> Option<User> {
        self.users.get(id).map(|entry| entry.value().clone())
    }

    fn update(&self, id: &UserId, user: User) -> Result<User, StoreError> {
        // The entry holds its shard lock until dropped, so the replacement
        // lands as one step relative to concurrent update/delete on this id.
        match self.users.entry(*id) {
            Entry::Occupied(mut slot) => {
                let replacement = user.with_id(*id);
                slot.insert(replacement.clone());
                Ok(replacement)
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(*id)),
        }
    }

    fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        self.users
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*id))
    }

    fn find_all(&self) -> Vec<User> {
        self.users.iter().map(|entry| entry.value().clone()).collect()
    }
}
