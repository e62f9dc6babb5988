//! Business logic services

pub mod catalog;
pub mod reservations;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub reservations: reservations::ReservationService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            reservations: reservations::ReservationService::new(repository.clone()),
            repository,
        }
    }

    /// Readiness probe on the storage backend
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
