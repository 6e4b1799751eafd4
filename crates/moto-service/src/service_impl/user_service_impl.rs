//! Repository-backed user service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::password::PasswordHasher;
use crate::user_service::UserService;
use async_trait::async_trait;
use moto_core::{MotoError, MotoResult, NewUser, UserChanges, UserId, ValidateExt};
use moto_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// User service backed directly by the repository. This is the underlying
/// data access the cache layer wraps; it never touches the cache itself.
pub struct UserServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
}

impl<R: UserRepository> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<R>, password_hasher: Arc<PasswordHasher>) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserServiceImpl<R> {
    async fn list_users(&self) -> MotoResult<UserListResponse> {
        debug!("Listing users");

        let users = self.user_repository.find_all().await?;
        Ok(UserListResponse::from(users))
    }

    async fn get_user(&self, id: UserId) -> MotoResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| MotoError::not_found("User", id))?;

        Ok(UserResponse::from(user))
    }

    async fn create_user(&self, request: CreateUserRequest) -> MotoResult<UserResponse> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        let password_hash = self.password_hasher.hash(&request.password)?;

        let new_user = NewUser {
            email: request.email,
            password_hash,
            user_type: request.user_type,
            phone_number: request.phone_number,
            first_name: request.first_name,
            last_name: request.last_name,
        };

        let saved_user = self.user_repository.create(new_user).await?;

        info!("User created: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> MotoResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let password_hash = request
            .password
            .as_deref()
            .map(|p| self.password_hasher.hash(p))
            .transpose()?;

        let changes = UserChanges {
            email: request.email,
            password_hash,
            user_type: request.user_type,
            phone_number: request.phone_number,
            first_name: request.first_name,
            last_name: request.last_name,
            is_active: request.is_active,
        };

        let updated_user = self
            .user_repository
            .update(id, changes)
            .await?
            .ok_or_else(|| MotoError::not_found("User", id))?;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated_user))
    }

    async fn delete_user(&self, id: UserId) -> MotoResult<()> {
        debug!("Deleting user: {}", id);

        let deleted = self.user_repository.delete(id).await?;

        if !deleted {
            return Err(MotoError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl<R: UserRepository> std::fmt::Debug for UserServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moto_core::UserType;
    use moto_repository::MemoryUserRepository;

    fn service() -> UserServiceImpl<MemoryUserRepository> {
        UserServiceImpl::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(PasswordHasher::new()),
        )
    }

    fn create_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: "password123".to_string(),
            user_type: UserType::Rider,
            phone_number: None,
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let created = service
            .create_user(create_request("a@example.com"))
            .await
            .unwrap();
        let fetched = service.get_user(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let service = service();
        let mut request = create_request("a@example.com");
        request.email = "broken".to_string();
        let err = service.create_user(request).await.unwrap_err();
        assert!(matches!(err, MotoError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = service();
        let err = service.get_user(UserId::new(404)).await.unwrap_err();
        assert!(matches!(err, MotoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service();
        let err = service
            .update_user(UserId::new(404), UpdateUserRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MotoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = service();
        let err = service.delete_user(UserId::new(404)).await.unwrap_err();
        assert!(matches!(err, MotoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let service = service();
        let created = service
            .create_user(create_request("p@example.com"))
            .await
            .unwrap();
        let updated = service
            .update_user(
                created.id,
                UpdateUserRequest {
                    password: Some("new-password-1".to_string()),
                    ..UpdateUserRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert!(updated.updated_at >= created.updated_at);
    }
}
