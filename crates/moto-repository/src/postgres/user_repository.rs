//! PostgreSQL user repository implementation.

use crate::traits::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moto_core::{MotoResult, NewUser, User, UserChanges, UserId, UserType};
use sqlx::{FromRow, PgPool};
use tracing::debug;

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    user_type: String,
    phone_number: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            email: row.email,
            password_hash: row.password_hash,
            user_type: UserType::parse(&row.user_type),
            phone_number: row.phone_number,
            first_name: row.first_name,
            last_name: row.last_name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, user_type, phone_number, \
                            first_name, last_name, is_active, created_at, updated_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> MotoResult<Vec<User>> {
        debug!("Fetching all users");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> MotoResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> MotoResult<User> {
        debug!("Creating user: {}", new_user.email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, password_hash, user_type, phone_number,
                               first_name, last_name, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.user_type.as_str())
        .bind(&new_user.phone_number)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(User::from(row))
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> MotoResult<Option<User>> {
        debug!("Updating user: {}", id);

        let Some(mut user) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        user.apply(changes);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, user_type = $4, phone_number = $5,
                first_name = $6, last_name = $7, is_active = $8, updated_at = $9
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id.into_inner())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.user_type.as_str())
        .bind(&user.phone_number)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_active)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: UserId) -> MotoResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> MotoResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.unsigned_abs())
    }
}
