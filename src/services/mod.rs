//! Business logic services

pub mod catalog;
pub mod readers;
pub mod rentals;
pub mod users;

use crate::{config::LoansConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: users::AuthService,
    pub catalog: catalog::CatalogService,
    pub readers: readers::ReadersService,
    pub rentals: rentals::RentalsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, loans_config: LoansConfig) -> Self {
        Self {
            auth: users::AuthService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            readers: readers::ReadersService::new(repository.clone()),
            rentals: rentals::RentalsService::new(repository, loans_config),
        }
    }
}
