//! Readers repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::reader::{Reader, ReaderInput},
};

use super::is_unique_violation;

#[derive(Clone)]
pub struct ReadersRepository {
    pool: SqlitePool,
}

impl ReadersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all readers
    pub async fn list(&self) -> AppResult<Vec<Reader>> {
        let readers = sqlx::query_as::<_, Reader>("SELECT * FROM readers")
            .fetch_all(&self.pool)
            .await?;
        Ok(readers)
    }

    /// Get reader by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Reader> {
        sqlx::query_as::<_, Reader>("SELECT * FROM readers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reader with id {} not found", id)))
    }

    /// Insert a new reader. The store enforces id_card uniqueness; a
    /// violation surfaces as `DuplicateIdCard`.
    pub async fn create(&self, reader: &ReaderInput) -> AppResult<Reader> {
        let result = sqlx::query(
            r#"
            INSERT INTO readers (name, surname, address, phone, email, id_card)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reader.name)
        .bind(&reader.surname)
        .bind(&reader.address)
        .bind(&reader.phone)
        .bind(&reader.email)
        .bind(&reader.id_card)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateIdCard
            } else {
                AppError::Database(e)
            }
        })?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    /// Overwrite all fields of an existing reader
    pub async fn update(&self, id: i64, reader: &ReaderInput) -> AppResult<Reader> {
        let result = sqlx::query(
            r#"
            UPDATE readers
            SET name = ?, surname = ?, address = ?, phone = ?, email = ?, id_card = ?
            WHERE id = ?
            "#,
        )
        .bind(&reader.name)
        .bind(&reader.surname)
        .bind(&reader.address)
        .bind(&reader.phone)
        .bind(&reader.email)
        .bind(&reader.id_card)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateIdCard
            } else {
                AppError::Database(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Reader with id {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Hard-delete a reader row. Rental history referencing the reader is
    /// intentionally retained.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM readers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Reader with id {} not found", id)));
        }
        Ok(())
    }
}
