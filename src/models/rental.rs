//! Rental model and report rows
//!
//! A rental is `Open` while `return_date` is NULL and `Closed` once it is
//! set; the copy is considered checked out for the whole open interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rental {
    pub id: i64,
    pub book_id: i64,
    pub borrower_id: i64,
    pub rental_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Row of the borrowed/overdue reports: an open rental joined with its book
/// and reader attributes
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowedBook {
    pub rental_id: i64,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub reader_id: i64,
    pub name: String,
    pub surname: String,
    pub rental_date: DateTime<Utc>,
}

/// Rental as shown on a reader's detail page, joined with book attributes
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReaderRental {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub rental_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}
