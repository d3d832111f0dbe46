//! Staff users repository for database operations

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

use super::is_unique_violation;

#[derive(Clone)]
pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a new staff account with an already-hashed password. The store
    /// enforces username uniqueness; a violation surfaces as
    /// `DuplicateUsername`.
    pub async fn create(
        &self,
        username: &str,
        hashed_password: &str,
        now: DateTime<Utc>,
    ) -> AppResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, password, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(hashed_password)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateUsername
            } else {
                AppError::Database(e)
            }
        })?;

        self.get_by_id(result.last_insert_rowid()).await
    }
}
