//! User service trait.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use async_trait::async_trait;
use moto_core::{MotoResult, UserId};

/// User service interface: the four CRUD shapes the REST layer calls.
///
/// Implemented by the repository-backed [`UserServiceImpl`] and decorated
/// by [`CachedUserService`], which adds the response cache in front of the
/// read paths.
///
/// [`UserServiceImpl`]: crate::UserServiceImpl
/// [`CachedUserService`]: crate::CachedUserService
#[async_trait]
pub trait UserService: Send + Sync {
    /// Returns the full user collection.
    async fn list_users(&self) -> MotoResult<UserListResponse>;

    /// Returns a single user, or `NotFound`.
    async fn get_user(&self, id: UserId) -> MotoResult<UserResponse>;

    /// Creates a user from validated fields.
    async fn create_user(&self, request: CreateUserRequest) -> MotoResult<UserResponse>;

    /// Updates a user, or `NotFound`.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest)
        -> MotoResult<UserResponse>;

    /// Deletes a user, or `NotFound`.
    async fn delete_user(&self, id: UserId) -> MotoResult<()>;
}
