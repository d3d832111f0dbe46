//! Reader roster service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reader::{Reader, ReaderDetails, ReaderInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReadersService {
    repository: Repository,
}

impl ReadersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all readers
    pub async fn list_readers(&self) -> AppResult<Vec<Reader>> {
        self.repository.readers.list().await
    }

    /// Get reader by ID
    pub async fn get_reader(&self, id: i64) -> AppResult<Reader> {
        self.repository.readers.get_by_id(id).await
    }

    /// Reader detail view with their open and closed rentals
    pub async fn get_reader_details(&self, id: i64) -> AppResult<ReaderDetails> {
        let reader = self.repository.readers.get_by_id(id).await?;
        let open_rentals = self.repository.rentals.open_for_reader(id).await?;
        let closed_rentals = self.repository.rentals.closed_for_reader(id).await?;
        Ok(ReaderDetails {
            reader,
            open_rentals,
            closed_rentals,
        })
    }

    /// Create a new reader
    pub async fn create_reader(&self, input: ReaderInput) -> AppResult<Reader> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.readers.create(&input).await
    }

    /// Overwrite all fields of an existing reader
    pub async fn update_reader(&self, id: i64, input: ReaderInput) -> AppResult<Reader> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.readers.update(id, &input).await
    }

    /// Delete a reader. Refused while the reader holds an unreturned book;
    /// closed rental history stays in the store after deletion.
    pub async fn delete_reader(&self, id: i64) -> AppResult<()> {
        self.repository.readers.get_by_id(id).await?;
        if self.repository.rentals.has_open_for_reader(id).await? {
            return Err(AppError::ReaderHasOpenLoans);
        }
        self.repository.readers.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::book::BookInput,
        services::{catalog::CatalogService, rentals::RentalsService},
        test_support::memory_pool,
    };

    fn reader(id_card: &str) -> ReaderInput {
        ReaderInput {
            name: "Anna".to_string(),
            surname: "Nowak".to_string(),
            address: "3 Elm Street".to_string(),
            phone: "555-0100".to_string(),
            email: "anna@example.com".to_string(),
            id_card: id_card.to_string(),
        }
    }

    fn book() -> BookInput {
        BookInput {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            image: None,
            publish_date: None,
            isbn: None,
            language: None,
            publisher: None,
            copies: 2,
            tags: None,
        }
    }

    async fn repo() -> Repository {
        Repository::new(memory_pool().await)
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id_card() {
        let readers = ReadersService::new(repo().await);
        readers.create_reader(reader("ID-1")).await.unwrap();
        let err = readers.create_reader(reader("ID-1")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdCard));
    }

    #[tokio::test]
    async fn delete_is_refused_while_a_loan_is_open() {
        let repository = repo().await;
        let pool = repository.pool.clone();
        let readers = ReadersService::new(repository.clone());
        let catalog = CatalogService::new(repository.clone());
        let rentals = RentalsService::new(repository, Default::default());

        let r = readers.create_reader(reader("ID-1")).await.unwrap();
        let b = catalog.create_book(book()).await.unwrap();
        rentals.borrow(b.id, r.id).await.unwrap();

        let err = readers.delete_reader(r.id).await.unwrap_err();
        assert!(matches!(err, AppError::ReaderHasOpenLoans));

        // After the return the delete goes through, history retained
        rentals.give_back(b.id, r.id).await.unwrap();
        readers.delete_reader(r.id).await.unwrap();

        let history: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(history, 1);
    }

    #[tokio::test]
    async fn details_split_open_and_closed_rentals() {
        let repository = repo().await;
        let readers = ReadersService::new(repository.clone());
        let catalog = CatalogService::new(repository.clone());
        let rentals = RentalsService::new(repository, Default::default());

        let r = readers.create_reader(reader("ID-1")).await.unwrap();
        let b = catalog.create_book(book()).await.unwrap();

        rentals.borrow(b.id, r.id).await.unwrap();
        rentals.give_back(b.id, r.id).await.unwrap();
        rentals.borrow(b.id, r.id).await.unwrap();

        let details = readers.get_reader_details(r.id).await.unwrap();
        assert_eq!(details.reader.id_card, "ID-1");
        assert_eq!(details.open_rentals.len(), 1);
        assert_eq!(details.closed_rentals.len(), 1);
        assert_eq!(details.open_rentals[0].title, "Dune");
        assert!(details.closed_rentals[0].return_date.is_some());
    }

    #[tokio::test]
    async fn delete_of_unknown_reader_is_not_found() {
        let readers = ReadersService::new(repo().await);
        let err = readers.delete_reader(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
