//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, readers, rentals};
use crate::error::ErrorResponse;
use crate::models::{
    book::{Book, BookInput},
    reader::{Reader, ReaderDetails, ReaderInput},
    rental::{BorrowedBook, ReaderRental, Rental},
    user::{LoginRequest, RegisterRequest, User},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atheneum API",
        version = "1.0.0",
        description = "Library Inventory and Lending Tracker REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::logout,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::get_book_for_edit,
        books::update_book,
        books::search_books,
        books::search_books_post,
        // Readers
        readers::list_readers,
        readers::create_reader,
        readers::get_reader_for_edit,
        readers::update_reader,
        readers::get_reader_details,
        readers::delete_reader,
        // Rentals
        rentals::borrow_form,
        rentals::borrow_book,
        rentals::return_form,
        rentals::return_book,
        rentals::borrowed_books,
        rentals::overdue_books,
    ),
    components(schemas(
        health::HealthResponse,
        auth::LoginResponse,
        books::SearchRequest,
        rentals::RentalRequest,
        rentals::RentalForm,
        Book,
        BookInput,
        Reader,
        ReaderInput,
        ReaderDetails,
        Rental,
        BorrowedBook,
        ReaderRental,
        User,
        RegisterRequest,
        LoginRequest,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Staff authentication"),
        (name = "books", description = "Book catalog"),
        (name = "readers", description = "Reader roster"),
        (name = "rentals", description = "Rental lifecycle and reports"),
        (name = "health", description = "Service probes")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}

/// Router serving the Swagger UI and the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
