//! Rental lifecycle service
//!
//! A rental moves Open -> Closed exactly once. Borrowing decrements the
//! book's copies, returning increments them; both run transactionally in the
//! repository.

use chrono::{Duration, Utc};

use crate::{
    config::LoansConfig,
    error::AppResult,
    models::rental::{BorrowedBook, Rental},
    repository::Repository,
};

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
    config: LoansConfig,
}

impl RentalsService {
    pub fn new(repository: Repository, config: LoansConfig) -> Self {
        Self { repository, config }
    }

    /// Borrow a book for a reader. Fails with `NoCopiesAvailable` when the
    /// book has no free copies.
    pub async fn borrow(&self, book_id: i64, reader_id: i64) -> AppResult<Rental> {
        // Verify reader exists before touching the copies counter
        self.repository.readers.get_by_id(reader_id).await?;
        let rental = self
            .repository
            .rentals
            .borrow(book_id, reader_id, Utc::now())
            .await?;
        tracing::info!(
            "Book {} borrowed by reader {} (rental {})",
            book_id,
            reader_id,
            rental.id
        );
        Ok(rental)
    }

    /// Return a book. When the reader holds several open rentals of the same
    /// book, the oldest one closes.
    pub async fn give_back(&self, book_id: i64, reader_id: i64) -> AppResult<Rental> {
        let rental = self
            .repository
            .rentals
            .give_back(book_id, reader_id, Utc::now())
            .await?;
        tracing::info!(
            "Book {} returned by reader {} (rental {})",
            book_id,
            reader_id,
            rental.id
        );
        Ok(rental)
    }

    /// All currently open rentals with book and reader attributes
    pub async fn borrowed_books(&self) -> AppResult<Vec<BorrowedBook>> {
        self.repository.rentals.borrowed().await
    }

    /// Open rentals older than the configured loan window, at calendar-date
    /// granularity: a rental dated exactly `overdue_days` ago is not yet
    /// overdue.
    pub async fn overdue_books(&self) -> AppResult<Vec<BorrowedBook>> {
        let cutoff = Utc::now().date_naive() - Duration::days(self.config.overdue_days as i64);
        self.repository.rentals.overdue(cutoff).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{book::BookInput, reader::ReaderInput},
        services::{catalog::CatalogService, readers::ReadersService},
        test_support::memory_pool,
    };
    use chrono::{DateTime, Utc};
    use sqlx::SqlitePool;

    struct Fixture {
        pool: SqlitePool,
        catalog: CatalogService,
        readers: ReadersService,
        rentals: RentalsService,
    }

    async fn fixture() -> Fixture {
        let pool = memory_pool().await;
        let repository = Repository::new(pool.clone());
        Fixture {
            pool,
            catalog: CatalogService::new(repository.clone()),
            readers: ReadersService::new(repository.clone()),
            rentals: RentalsService::new(repository, LoansConfig::default()),
        }
    }

    impl Fixture {
        async fn add_book(&self, title: &str, copies: i64) -> i64 {
            self.catalog
                .create_book(BookInput {
                    title: title.to_string(),
                    author: "Frank Herbert".to_string(),
                    image: None,
                    publish_date: None,
                    isbn: None,
                    language: None,
                    publisher: None,
                    copies,
                    tags: None,
                })
                .await
                .unwrap()
                .id
        }

        async fn add_reader(&self, id_card: &str) -> i64 {
            self.readers
                .create_reader(ReaderInput {
                    name: "Anna".to_string(),
                    surname: "Nowak".to_string(),
                    address: "3 Elm Street".to_string(),
                    phone: "555-0100".to_string(),
                    email: "anna@example.com".to_string(),
                    id_card: id_card.to_string(),
                })
                .await
                .unwrap()
                .id
        }

        async fn copies(&self, book_id: i64) -> i64 {
            sqlx::query_scalar("SELECT copies FROM books WHERE id = ?")
                .bind(book_id)
                .fetch_one(&self.pool)
                .await
                .unwrap()
        }

        async fn backdate_rental(&self, rental_id: i64, when: DateTime<Utc>) {
            sqlx::query("UPDATE rentals SET rental_date = ? WHERE id = ?")
                .bind(when)
                .bind(rental_id)
                .execute(&self.pool)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn borrow_then_return_restores_copies() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 2).await;
        let reader = fx.add_reader("ID-1").await;

        let rental = fx.rentals.borrow(book, reader).await.unwrap();
        assert!(rental.is_open());
        assert_eq!(fx.copies(book).await, 1);

        let closed = fx.rentals.give_back(book, reader).await.unwrap();
        assert_eq!(closed.id, rental.id);
        assert!(!closed.is_open());
        assert_eq!(fx.copies(book).await, 2);

        let closed_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rentals WHERE return_date IS NOT NULL",
        )
        .fetch_one(&fx.pool)
        .await
        .unwrap();
        assert_eq!(closed_count, 1);
    }

    #[tokio::test]
    async fn borrow_fails_when_no_copies_available() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 0).await;
        let reader = fx.add_reader("ID-1").await;

        let err = fx.rentals.borrow(book, reader).await.unwrap_err();
        assert!(matches!(err, AppError::NoCopiesAvailable));
        assert_eq!(fx.copies(book).await, 0);
    }

    #[tokio::test]
    async fn borrow_of_unknown_book_or_reader_is_not_found() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 1).await;
        let reader = fx.add_reader("ID-1").await;

        let err = fx.rentals.borrow(999, reader).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = fx.rentals.borrow(book, 999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        // The failed attempts must not have touched the counter
        assert_eq!(fx.copies(book).await, 1);
    }

    #[tokio::test]
    async fn return_without_open_rental_is_not_found() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 1).await;
        let reader = fx.add_reader("ID-1").await;

        let err = fx.rentals.give_back(book, reader).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(fx.copies(book).await, 1);
    }

    #[tokio::test]
    async fn return_closes_the_oldest_matching_rental_first() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 2).await;
        let reader = fx.add_reader("ID-1").await;

        let first = fx.rentals.borrow(book, reader).await.unwrap();
        let second = fx.rentals.borrow(book, reader).await.unwrap();
        fx.backdate_rental(first.id, Utc::now() - Duration::days(10)).await;

        let closed = fx.rentals.give_back(book, reader).await.unwrap();
        assert_eq!(closed.id, first.id);

        let still_open: i64 =
            sqlx::query_scalar("SELECT id FROM rentals WHERE return_date IS NULL")
                .fetch_one(&fx.pool)
                .await
                .unwrap();
        assert_eq!(still_open, second.id);
    }

    #[tokio::test]
    async fn overdue_uses_a_strict_thirty_day_cutoff() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 3).await;
        let r1 = fx.add_reader("ID-1").await;
        let r2 = fx.add_reader("ID-2").await;

        let old = fx.rentals.borrow(book, r1).await.unwrap();
        let edge = fx.rentals.borrow(book, r2).await.unwrap();
        fx.backdate_rental(old.id, Utc::now() - Duration::days(31)).await;
        fx.backdate_rental(edge.id, Utc::now() - Duration::days(30)).await;

        let overdue = fx.rentals.overdue_books().await.unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].rental_id, old.id);

        // A closed rental never shows up, however old
        fx.rentals.give_back(book, r1).await.unwrap();
        assert!(fx.rentals.overdue_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn borrowed_report_lists_open_rentals_with_joined_attributes() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 2).await;
        let reader = fx.add_reader("ID-1").await;

        fx.rentals.borrow(book, reader).await.unwrap();
        let report = fx.rentals.borrowed_books().await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].title, "Dune");
        assert_eq!(report[0].surname, "Nowak");

        fx.rentals.give_back(book, reader).await.unwrap();
        assert!(fx.rentals.borrowed_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn single_copy_circulates_between_readers() {
        let fx = fixture().await;
        let book = fx.add_book("Dune", 1).await;
        let r1 = fx.add_reader("ID-1").await;
        let r2 = fx.add_reader("ID-2").await;

        fx.rentals.borrow(book, r1).await.unwrap();
        assert_eq!(fx.copies(book).await, 0);

        let err = fx.rentals.borrow(book, r2).await.unwrap_err();
        assert!(matches!(err, AppError::NoCopiesAvailable));

        fx.rentals.give_back(book, r1).await.unwrap();
        assert_eq!(fx.copies(book).await, 1);

        fx.rentals.borrow(book, r2).await.unwrap();
        assert_eq!(fx.copies(book).await, 0);
    }
}
