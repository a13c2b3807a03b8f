//! PostgreSQL user repository implementation.

use crate::{pool::DatabasePoolInterface, traits::UserRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{QuillError, QuillResult, User, UserId, UserRole};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct PgUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    name: String,
    bio: Option<String>,
    password_hash: String,
    profile_picture: Option<Vec<u8>>,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = QuillError;

    /// Fails when the stored role string is not one this binary knows.
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role).ok_or_else(|| {
            QuillError::Database(format!("unrecognized role '{}' for user {}", row.role, row.id))
        })?;

        Ok(User {
            id: UserId::new(row.id),
            username: row.username,
            email: row.email,
            name: row.name,
            bio: row.bio,
            password_hash: row.password_hash,
            profile_picture: row.profile_picture,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, email, name, bio, password_hash, profile_picture, role, is_active, created_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> QuillResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> QuillResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> QuillResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn save(&self, user: &User) -> QuillResult<User> {
        debug!("Saving user: {}", user.username);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, email, name, bio, password_hash, profile_picture, role, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.bio)
        .bind(&user.password_hash)
        .bind(&user.profile_picture)
        .bind(user.role.to_string())
        .bind(user.is_active)
        .fetch_one(self.pool.inner())
        .await?;

        User::try_from(row)
    }

    async fn update(&self, user: &User) -> QuillResult<u64> {
        debug!("Updating user: {}", user.id);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, name = $4, bio = $5,
                profile_picture = $6, role = $7, is_active = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.bio)
        .bind(&user.profile_picture)
        .bind(user.role.to_string())
        .bind(user.is_active)
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: 42,
            username: "alice".into(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
            bio: None,
            password_hash: "hash".into(),
            profile_picture: None,
            role: role.into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_with_known_role_converts() {
        let user = User::try_from(row("moderator")).unwrap();
        assert_eq!(user.role, UserRole::Moderator);
    }

    #[test]
    fn row_with_unknown_role_is_a_database_error() {
        let err = User::try_from(row("superuser")).unwrap_err();
        assert!(matches!(err, QuillError::Database(_)));
        assert!(err.to_string().contains("superuser"));
    }
}
