//! Books repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: SqlitePool,
}

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all books in storage order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Insert a new book and return the stored row
    pub async fn create(&self, book: &BookInput) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, image, publish_date, isbn, language, publisher, copies, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.image)
        .bind(&book.publish_date)
        .bind(&book.isbn)
        .bind(&book.language)
        .bind(&book.publisher)
        .bind(book.copies)
        .bind(&book.tags)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    /// Overwrite all fields of an existing book
    pub async fn update(&self, id: i64, book: &BookInput) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, image = ?, publish_date = ?, isbn = ?,
                language = ?, publisher = ?, copies = ?, tags = ?
            WHERE id = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.image)
        .bind(&book.publish_date)
        .bind(&book.isbn)
        .bind(&book.language)
        .bind(&book.publisher)
        .bind(book.copies)
        .bind(&book.tags)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Case-insensitive substring search across title, author and tags
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", query);
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE title LIKE ? OR author LIKE ? OR tags LIKE ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}
