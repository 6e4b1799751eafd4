//! Repository trait definitions.

use async_trait::async_trait;
use moto_core::{MotoResult, NewUser, User, UserChanges, UserId};

/// User repository trait: the underlying data store client that the cache
/// layer sits in front of.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every user record.
    async fn find_all(&self) -> MotoResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> MotoResult<Option<User>>;

    /// Persists a new user and returns it with its assigned ID.
    async fn create(&self, new_user: NewUser) -> MotoResult<User>;

    /// Applies changes to an existing user. Returns `None` when the user
    /// does not exist.
    async fn update(&self, id: UserId, changes: UserChanges) -> MotoResult<Option<User>>;

    /// Deletes a user by ID. Returns `true` when a record was removed.
    async fn delete(&self, id: UserId) -> MotoResult<bool>;

    /// Counts all users.
    async fn count(&self) -> MotoResult<u64>;
}
