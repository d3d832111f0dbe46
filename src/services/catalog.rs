//! Book catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create_book(&self, input: BookInput) -> AppResult<Book> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(&input).await
    }

    /// Overwrite all fields of an existing book
    pub async fn update_book(&self, id: i64, input: BookInput) -> AppResult<Book> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.update(id, &input).await
    }

    /// Substring search over title, author and tags. An empty or
    /// whitespace-only query yields an empty result set, not the whole
    /// catalog.
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.books.search(query).await
    }
}
