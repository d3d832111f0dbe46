//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Catalog entry as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Cover image URL
    pub image: Option<String>,
    pub publish_date: Option<String>,
    pub isbn: Option<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    /// Physical units available for loan
    pub copies: i64,
    /// Comma-separated free-form tags
    pub tags: Option<String>,
}

/// Create or full-overwrite edit request for a book
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub image: Option<String>,
    pub publish_date: Option<String>,
    pub isbn: Option<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    #[validate(range(min = 0, message = "Copies must be a non-negative integer"))]
    pub copies: i64,
    pub tags: Option<String>,
}
