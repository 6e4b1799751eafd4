//! In-memory user repository.
//!
//! Used as the test double for the service layer and for running the API
//! without a database. Mirrors the PostgreSQL implementation's behavior,
//! including the unique-email constraint.

use crate::traits::UserRepository;
use async_trait::async_trait;
use chrono::Utc;
use moto_core::{MotoError, MotoResult, NewUser, User, UserChanges, UserId};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory user repository.
pub struct MemoryUserRepository {
    users: Mutex<BTreeMap<UserId, User>>,
    next_id: AtomicI64,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a repository pre-populated with users.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        let max_id = users.iter().map(|u| u.id.into_inner()).max().unwrap_or(0);
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
            next_id: AtomicI64::new(max_id + 1),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_all(&self) -> MotoResult<Vec<User>> {
        Ok(self.users.lock().values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> MotoResult<Option<User>> {
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> MotoResult<User> {
        let mut users = self.users.lock();

        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(MotoError::conflict(format!(
                "Email '{}' already exists",
                new_user.email
            )));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = Utc::now();
        let user = User {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            user_type: new_user.user_type,
            phone_number: new_user.phone_number,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> MotoResult<Option<User>> {
        let mut users = self.users.lock();

        if let Some(new_email) = &changes.email {
            if users
                .iter()
                .any(|(uid, u)| *uid != id && u.email.eq_ignore_ascii_case(new_email))
            {
                return Err(MotoError::conflict(format!(
                    "Email '{}' already exists",
                    new_email
                )));
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        user.apply(changes);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> MotoResult<bool> {
        Ok(self.users.lock().remove(&id).is_some())
    }

    async fn count(&self) -> MotoResult<u64> {
        Ok(self.users.lock().len() as u64)
    }
}
