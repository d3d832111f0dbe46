//! Rental lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        reader::Reader,
        rental::{BorrowedBook, Rental},
    },
};

use super::AuthenticatedUser;

/// Borrow/return request naming the reader
#[derive(Deserialize, ToSchema)]
pub struct RentalRequest {
    pub reader_id: i64,
}

/// Data behind the borrow/return forms: the book plus the reader roster
#[derive(Serialize, ToSchema)]
pub struct RentalForm {
    pub book: Book,
    pub readers: Vec<Reader>,
}

async fn rental_form(state: &crate::AppState, book_id: i64) -> AppResult<RentalForm> {
    let book = state.services.catalog.get_book(book_id).await?;
    let readers = state.services.readers.list_readers().await?;
    Ok(RentalForm { book, readers })
}

/// Data for the borrow form
#[utoipa::path(
    get,
    path = "/borrow/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book and reader roster", body = RentalForm),
        (status = 404, description = "Book not found")
    )
)]
pub async fn borrow_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(book_id): Path<i64>,
) -> AppResult<Json<RentalForm>> {
    Ok(Json(rental_form(&state, book_id).await?))
}

/// Borrow a book for a reader
#[utoipa::path(
    post,
    path = "/borrow/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = RentalRequest,
    responses(
        (status = 201, description = "Rental opened", body = Rental),
        (status = 404, description = "Book or reader not found"),
        (status = 422, description = "No copies available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(book_id): Path<i64>,
    Json(request): Json<RentalRequest>,
) -> AppResult<(StatusCode, Json<Rental>)> {
    let rental = state
        .services
        .rentals
        .borrow(book_id, request.reader_id)
        .await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

/// Data for the return form
#[utoipa::path(
    get,
    path = "/return/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book and reader roster", body = RentalForm),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(book_id): Path<i64>,
) -> AppResult<Json<RentalForm>> {
    Ok(Json(rental_form(&state, book_id).await?))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/return/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = RentalRequest,
    responses(
        (status = 200, description = "Rental closed", body = Rental),
        (status = 404, description = "No open rental for this book and reader")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(book_id): Path<i64>,
    Json(request): Json<RentalRequest>,
) -> AppResult<Json<Rental>> {
    let rental = state
        .services
        .rentals
        .give_back(book_id, request.reader_id)
        .await?;
    Ok(Json(rental))
}

/// All currently borrowed books
#[utoipa::path(
    get,
    path = "/borrowed_books",
    tag = "rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Open rentals with book and reader attributes", body = Vec<BorrowedBook>)
    )
)]
pub async fn borrowed_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowedBook>>> {
    let rows = state.services.rentals.borrowed_books().await?;
    Ok(Json(rows))
}

/// Open rentals past the loan window
#[utoipa::path(
    get,
    path = "/overdue_books",
    tag = "rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue rentals with book and reader attributes", body = Vec<BorrowedBook>)
    )
)]
pub async fn overdue_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowedBook>>> {
    let rows = state.services.rentals.overdue_books().await?;
    Ok(Json(rows))
}
