//! Repository layer for database operations

pub mod books;
pub mod readers;
pub mod rentals;
pub mod sessions;
pub mod users;

use sqlx::SqlitePool;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub books: books::BooksRepository,
    pub readers: readers::ReadersRepository,
    pub rentals: rentals::RentalsRepository,
    pub users: users::UsersRepository,
    pub sessions: sessions::SessionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            readers: readers::ReadersRepository::new(pool.clone()),
            rentals: rentals::RentalsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            sessions: sessions::SessionsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Unique-constraint faults are pre-checked where possible; anything that
/// still reaches the store is mapped to the taxonomy at this boundary.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
