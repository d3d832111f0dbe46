//! Reader (borrower) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::rental::ReaderRental;

/// Registered borrower
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reader {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Identity card number, unique per reader
    pub id_card: String,
}

/// Create or full-overwrite edit request for a reader
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReaderInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Surname must not be empty"))]
    pub surname: String,
    pub address: String,
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Id card must not be empty"))]
    pub id_card: String,
}

/// Reader detail view: the reader plus their open and closed rentals
#[derive(Debug, Serialize, ToSchema)]
pub struct ReaderDetails {
    pub reader: Reader,
    pub open_rentals: Vec<ReaderRental>,
    pub closed_rentals: Vec<ReaderRental>,
}
