//! User storage.

mod memory;

pub use memory::InMemoryUserStore;

use crate::error::{StoreError, ValidationError};
use crate::models::{User, UserId};

/// CRUD contract for user storage.
///
/// Single-key operations (create/find/update/delete by id) are atomic and
/// linearizable per key; operations on different keys do not block each
/// other.
pub trait UserStore: Send + Sync {
    /// Insert a new user under a freshly generated id and return it. The id
    /// is always assigned by the store; callers cannot choose it. Inputs are
    /// trimmed and validated, so this never fails for valid input.
    fn create(&self, name: &str, email: &str) -> Result<User, ValidationError>;

    /// Pure lookup, no side effects.
    fn find_by_id(&self, id: &UserId) -> Option<User>;

    /// Atomically replace the record stored under `id` with `user` rebound
    /// to that id. The replacement is computed and installed as a single
    /// step relative to concurrent update/delete on the same id, so no
    /// update is lost and no partial record is ever observable.
    fn update(&self, id: &UserId, user: User) -> Result<User, StoreError>;

    /// Atomically remove the record stored under `id`.
    fn delete(&self, id: &UserId) -> Result<(), StoreError>;

    /// Snapshot of all stored users. Representative under concurrent
    /// mutation, not linearizable with it.
    fn find_all(&self) -> Vec<User>;
}
