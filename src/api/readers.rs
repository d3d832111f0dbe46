//! Reader roster endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::reader::{Reader, ReaderDetails, ReaderInput},
};

use super::AuthenticatedUser;

/// List all readers
#[utoipa::path(
    get,
    path = "/readers",
    tag = "readers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All registered readers", body = Vec<Reader>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_readers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> AppResult<Json<Vec<Reader>>> {
    let readers = state.services.readers.list_readers().await?;
    Ok(Json(readers))
}

/// Register a new reader
#[utoipa::path(
    post,
    path = "/add_reader",
    tag = "readers",
    security(("bearer_auth" = [])),
    request_body = ReaderInput,
    responses(
        (status = 201, description = "Reader created", body = Reader),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Id card already registered")
    )
)]
pub async fn create_reader(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Json(input): Json<ReaderInput>,
) -> AppResult<(StatusCode, Json<Reader>)> {
    let reader = state.services.readers.create_reader(input).await?;
    Ok((StatusCode::CREATED, Json(reader)))
}

/// Fetch the current row for the edit form
#[utoipa::path(
    get,
    path = "/edit_reader/{id}",
    tag = "readers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reader to edit", body = Reader),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_reader_for_edit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Reader>> {
    let reader = state.services.readers.get_reader(id).await?;
    Ok(Json(reader))
}

/// Overwrite all fields of a reader
#[utoipa::path(
    post,
    path = "/edit_reader/{id}",
    tag = "readers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reader ID")),
    request_body = ReaderInput,
    responses(
        (status = 200, description = "Reader updated", body = Reader),
        (status = 404, description = "Reader not found"),
        (status = 409, description = "Id card already registered")
    )
)]
pub async fn update_reader(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(input): Json<ReaderInput>,
) -> AppResult<Json<Reader>> {
    let reader = state.services.readers.update_reader(id, input).await?;
    Ok(Json(reader))
}

/// Reader details with open and closed rentals
#[utoipa::path(
    get,
    path = "/reader/{id}",
    tag = "readers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reader ID")),
    responses(
        (status = 200, description = "Reader with rental history", body = ReaderDetails),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_reader_details(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ReaderDetails>> {
    let details = state.services.readers.get_reader_details(id).await?;
    Ok(Json(details))
}

/// Delete a reader without open loans
#[utoipa::path(
    post,
    path = "/delete_reader/{id}",
    tag = "readers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reader ID")),
    responses(
        (status = 204, description = "Reader deleted"),
        (status = 404, description = "Reader not found"),
        (status = 422, description = "Reader still holds unreturned books")
    )
)]
pub async fn delete_reader(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.readers.delete_reader(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
