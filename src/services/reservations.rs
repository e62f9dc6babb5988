//! Reservation ledger service: reserve/return transitions, row primitives and projections

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    ledger::{self, Transition},
    models::{
        Book, CreateReservation, Reservation, ReservationHistory, ReservedBook, TransitionQuery,
        UpdateReservation,
    },
    repository::Repository,
};

pub const RESERVATION_NOT_FOUND: &str = "The reservation is not found.";
pub const INVALID_RESERVATION: &str = "Invalid reservation";

#[derive(Clone)]
pub struct ReservationService {
    repository: Repository,
}

impl ReservationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check out a book
    pub async fn reserve_book(&self, book_id: i32, query: TransitionQuery) -> AppResult<Reservation> {
        self.transition(book_id, Transition::Reserve, query).await
    }

    /// Return a checked out book
    pub async fn return_book(&self, book_id: i32, query: TransitionQuery) -> AppResult<Reservation> {
        self.transition(book_id, Transition::Return, query).await
    }

    async fn transition(
        &self,
        book_id: i32,
        transition: Transition,
        query: TransitionQuery,
    ) -> AppResult<Reservation> {
        query.validate()?;

        match self
            .repository
            .reservations
            .append_transition(book_id, transition, query.comment, Utc::now())
            .await
        {
            Ok(reservation) => {
                tracing::info!(
                    book_id,
                    reservation_id = reservation.id,
                    status = ?reservation.status,
                    "Book {} completed",
                    transition
                );
                Ok(reservation)
            }
            Err(e) => {
                tracing::debug!(book_id, "Book {} rejected: {}", transition, e);
                Err(e)
            }
        }
    }

    /// Books currently checked out, with their checkout comment
    pub async fn reserved_books(&self) -> AppResult<Vec<ReservedBook>> {
        let (books, events) = self.snapshot().await?;
        Ok(ledger::reserved_books(&books, &events))
    }

    /// Books not currently checked out
    pub async fn available_books(&self) -> AppResult<Vec<Book>> {
        let (books, events) = self.snapshot().await?;
        Ok(ledger::available_books(&books, &events))
    }

    /// Every book with reservations, with all of them
    pub async fn reservation_history(&self) -> AppResult<Vec<ReservationHistory>> {
        let (books, events) = self.snapshot().await?;
        Ok(ledger::reservation_history(&books, &events))
    }

    async fn snapshot(&self) -> AppResult<(Vec<Book>, Vec<Reservation>)> {
        let books = self.repository.books.list().await?;
        let events = self.repository.reservations.list().await?;
        Ok((books, events))
    }

    /// Latest reservation row of every book
    pub async fn latest_reservations(&self) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list_latest().await
    }

    /// All reservation rows
    pub async fn get_reservations(&self) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list().await
    }

    pub async fn get_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.repository
            .reservations
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(RESERVATION_NOT_FOUND.to_string()))
    }

    /// Insert a raw row. Bypasses the checkout/return rule.
    pub async fn create_reservation(&self, reservation: CreateReservation) -> AppResult<Reservation> {
        reservation.validate()?;
        self.repository.reservations.create(&reservation).await
    }

    /// Correct an existing row. Bypasses the checkout/return rule.
    pub async fn update_reservation(
        &self,
        id: i32,
        reservation: UpdateReservation,
    ) -> AppResult<Reservation> {
        reservation.validate()?;
        self.repository
            .reservations
            .update(id, &reservation)
            .await?
            .ok_or_else(|| AppError::NotFound(RESERVATION_NOT_FOUND.to_string()))
    }

    /// Remove a row. Bypasses the checkout/return rule.
    pub async fn delete_reservation(&self, id: i32) -> AppResult<()> {
        if !self.repository.reservations.delete(id).await? {
            return Err(AppError::NotFound(INVALID_RESERVATION.to_string()));
        }
        tracing::warn!(reservation_id = id, "Reservation row deleted");
        Ok(())
    }
}
