//! Rentals repository for database operations
//!
//! `borrow` and `give_back` each run inside a transaction: the copies
//! counter and the rental row move together or not at all.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::rental::{BorrowedBook, ReaderRental, Rental},
};

#[derive(Clone)]
pub struct RentalsRepository {
    pool: SqlitePool,
}

impl RentalsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get rental by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Rental> {
        sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id {} not found", id)))
    }

    /// Open a rental: decrement the book's copies and insert an open rental
    /// row in one transaction.
    pub async fn borrow(&self, book_id: i64, reader_id: i64, now: DateTime<Utc>) -> AppResult<Rental> {
        let mut tx = self.pool.begin().await?;

        // Guarded decrement: the availability check and the decrement are a
        // single statement, so two concurrent borrows cannot both take the
        // last copy.
        let updated = sqlx::query("UPDATE books SET copies = copies - 1 WHERE id = ? AND copies > 0")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?)")
                .bind(book_id)
                .fetch_one(&mut *tx)
                .await?;
            return Err(if exists {
                AppError::NoCopiesAvailable
            } else {
                AppError::NotFound(format!("Book with id {} not found", book_id))
            });
        }

        let result = sqlx::query(
            "INSERT INTO rentals (book_id, borrower_id, rental_date) VALUES (?, ?, ?)",
        )
        .bind(book_id)
        .bind(reader_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let rental_id = result.last_insert_rowid();

        tx.commit().await?;
        self.get_by_id(rental_id).await
    }

    /// Close one open rental for (book, reader) and increment the book's
    /// copies, in one transaction.
    ///
    /// When the reader holds several copies of the same book, the oldest
    /// rental closes first: earliest rental_date, then lowest id.
    pub async fn give_back(
        &self,
        book_id: i64,
        reader_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Rental> {
        let mut tx = self.pool.begin().await?;

        let rental_id: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM rentals
            WHERE book_id = ? AND borrower_id = ? AND return_date IS NULL
            ORDER BY rental_date ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(book_id)
        .bind(reader_id)
        .fetch_optional(&mut *tx)
        .await?;

        let rental_id = rental_id.ok_or_else(|| {
            AppError::NotFound(format!(
                "No open rental of book {} for reader {}",
                book_id, reader_id
            ))
        })?;

        sqlx::query("UPDATE rentals SET return_date = ? WHERE id = ?")
            .bind(now)
            .bind(rental_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE books SET copies = copies + 1 WHERE id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        self.get_by_id(rental_id).await
    }

    /// Whether the reader holds any unreturned book
    pub async fn has_open_for_reader(&self, reader_id: i64) -> AppResult<bool> {
        let open: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM rentals WHERE borrower_id = ? AND return_date IS NULL)",
        )
        .bind(reader_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(open)
    }

    /// Open rentals of a reader, joined with book attributes
    pub async fn open_for_reader(&self, reader_id: i64) -> AppResult<Vec<ReaderRental>> {
        let rentals = sqlx::query_as::<_, ReaderRental>(
            r#"
            SELECT b.id AS book_id, b.title, b.author, r.rental_date, r.return_date
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            WHERE r.borrower_id = ? AND r.return_date IS NULL
            ORDER BY r.rental_date, r.id
            "#,
        )
        .bind(reader_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rentals)
    }

    /// Closed rentals of a reader, joined with book attributes
    pub async fn closed_for_reader(&self, reader_id: i64) -> AppResult<Vec<ReaderRental>> {
        let rentals = sqlx::query_as::<_, ReaderRental>(
            r#"
            SELECT b.id AS book_id, b.title, b.author, r.rental_date, r.return_date
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            WHERE r.borrower_id = ? AND r.return_date IS NOT NULL
            ORDER BY r.rental_date, r.id
            "#,
        )
        .bind(reader_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rentals)
    }

    /// All open rentals joined with book and reader attributes
    pub async fn borrowed(&self) -> AppResult<Vec<BorrowedBook>> {
        let rows = sqlx::query_as::<_, BorrowedBook>(
            r#"
            SELECT r.id AS rental_id, b.id AS book_id, b.title, b.author,
                   rd.id AS reader_id, rd.name, rd.surname, r.rental_date
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            JOIN readers rd ON r.borrower_id = rd.id
            WHERE r.return_date IS NULL
            ORDER BY r.rental_date, r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open rentals whose rental date falls strictly before the cutoff
    /// calendar date.
    pub async fn overdue(&self, cutoff: NaiveDate) -> AppResult<Vec<BorrowedBook>> {
        let rows = sqlx::query_as::<_, BorrowedBook>(
            r#"
            SELECT r.id AS rental_id, b.id AS book_id, b.title, b.author,
                   rd.id AS reader_id, rd.name, rd.surname, r.rental_date
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            JOIN readers rd ON r.borrower_id = rd.id
            WHERE r.return_date IS NULL AND DATE(r.rental_date) < ?
            ORDER BY r.rental_date, r.id
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
