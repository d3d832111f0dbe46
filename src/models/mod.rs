//! Typed records for the Atheneum data model

pub mod book;
pub mod reader;
pub mod rental;
pub mod user;

pub use book::{Book, BookInput};
pub use reader::{Reader, ReaderDetails, ReaderInput};
pub use rental::{BorrowedBook, Rental, ReaderRental};
pub use user::User;
