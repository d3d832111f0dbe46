//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
};

use super::AuthenticatedUser;

/// Search request body (POST form of /search_books)
#[derive(Deserialize, ToSchema)]
pub struct SearchRequest {
    pub search: String,
}

/// Search query parameters (GET form of /search_books)
#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// List all books
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books in the catalog", body = Vec<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a new book to the catalog
#[utoipa::path(
    post,
    path = "/add",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Json(input): Json<BookInput>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.catalog.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Fetch the current row for the edit form
#[utoipa::path(
    get,
    path = "/edit_book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book to edit", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_for_edit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Overwrite all fields of a book
#[utoipa::path(
    post,
    path = "/edit_book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(input): Json<BookInput>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update_book(id, input).await?;
    Ok(Json(book))
}

/// Search books by title, author or tags (query string form)
#[utoipa::path(
    get,
    path = "/search_books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("q" = Option<String>, Query, description = "Substring to search for")),
    responses(
        (status = 200, description = "Matching books; empty query matches nothing", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_books(&params.q).await?;
    Ok(Json(books))
}

/// Search books by title, author or tags (request body form)
#[utoipa::path(
    post,
    path = "/search_books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching books; empty query matches nothing", body = Vec<Book>)
    )
)]
pub async fn search_books_post(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_books(&request.search).await?;
    Ok(Json(books))
}
