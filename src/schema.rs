//! Schema initializer
//!
//! Idempotently creates the store's tables and, on a fresh database, seeds
//! the first staff account from configuration. Runs once at startup, outside
//! the request path.

use sqlx::SqlitePool;

use crate::{
    config::AuthConfig,
    error::AppResult,
    services::users::hash_password,
};

/// Create all tables if they do not exist yet.
pub async fn create_tables(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            image TEXT,
            publish_date TEXT,
            isbn TEXT,
            language TEXT,
            publisher TEXT,
            copies INTEGER NOT NULL CHECK (copies >= 0),
            tags TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rentals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL,
            borrower_id INTEGER NOT NULL,
            rental_date TEXT NOT NULL,
            return_date TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS readers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            surname TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            id_card TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Seed the first staff account on an empty users table.
///
/// There is no built-in default credential. The account comes from
/// `auth.bootstrap_username` / `auth.bootstrap_password`; without them the
/// operator registers the first account through `POST /register`.
pub async fn bootstrap_account(pool: &SqlitePool, auth: &AuthConfig) -> AppResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    match (&auth.bootstrap_username, &auth.bootstrap_password) {
        (Some(username), Some(password)) => {
            let hashed = hash_password(password)?;
            sqlx::query(
                "INSERT INTO users (username, password, created_at) VALUES (?, ?, ?)",
            )
            .bind(username)
            .bind(hashed)
            .bind(chrono::Utc::now())
            .execute(pool)
            .await?;
            tracing::info!("Seeded bootstrap staff account '{}'", username);
        }
        _ => {
            tracing::warn!(
                "No staff accounts exist and no bootstrap credentials are configured; \
                 register the first account via POST /register"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_pool;

    #[tokio::test]
    async fn create_tables_is_idempotent() {
        let pool = memory_pool().await;
        // memory_pool already ran it once
        create_tables(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
             ('books', 'rentals', 'users', 'readers', 'sessions')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn bootstrap_seeds_only_on_empty_store() {
        let pool = memory_pool().await;
        let auth = AuthConfig {
            bootstrap_username: Some("librarian".to_string()),
            bootstrap_password: Some("hunter2".to_string()),
        };

        bootstrap_account(&pool, &auth).await.unwrap();
        bootstrap_account(&pool, &auth).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let stored: String = sqlx::query_scalar("SELECT password FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_ne!(stored, "hunter2", "password must never be stored in clear text");
    }

    #[tokio::test]
    async fn bootstrap_without_credentials_seeds_nothing() {
        let pool = memory_pool().await;
        bootstrap_account(&pool, &AuthConfig::default()).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn copies_check_rejects_negative_values() {
        let pool = memory_pool().await;
        let result = sqlx::query(
            "INSERT INTO books (title, author, copies) VALUES ('x', 'y', -1)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
