//! Sessions repository for database operations
//!
//! Sessions live in the store rather than in process memory, so no request
//! shares mutable state with another and logout is a plain row delete.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{error::AppResult, models::user::User};

#[derive(Clone)]
pub struct SessionsRepository {
    pool: SqlitePool,
}

impl SessionsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a session token for a user
    pub async fn create(&self, user_id: i64, token: &str, now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id)
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Resolve a session token to its staff account, if the session exists
    pub async fn find_user(&self, token: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM sessions s
            JOIN users u ON s.user_id = u.id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Delete a session token; deleting an unknown token is a no-op
    pub async fn delete(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
