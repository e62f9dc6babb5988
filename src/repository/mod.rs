//! Repository layer for database operations

pub mod books;
#[cfg(test)]
pub mod memory;
pub mod reservations;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use books::{BookRepository, PgBookRepository};
pub use reservations::{PgReservationRepository, ReservationRepository};

use crate::error::AppResult;

/// Main repository struct holding the table repositories
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pool: Option<Pool<Postgres>>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookRepository::new(pool.clone())),
            reservations: Arc::new(PgReservationRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Assemble a repository from arbitrary table implementations
    pub fn from_parts(
        books: Arc<dyn BookRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            books,
            reservations,
            pool: None,
        }
    }

    /// Check that the backing database answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
