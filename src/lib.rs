//! Atheneum Library Inventory and Lending Tracker
//!
//! A Rust REST server for a small library: book catalog, reader roster,
//! rental lifecycle and staff authentication over a single SQLite store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    /// In-memory store over the real schema. A single connection keeps the
    /// whole test on one `:memory:` database.
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        crate::schema::create_tables(&pool).await.expect("schema init");
        pool
    }
}
