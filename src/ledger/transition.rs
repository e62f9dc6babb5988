//! Reserve / return decisions

use chrono::{DateTime, Utc};

use super::state::BookState;
use crate::{
    error::{AppError, AppResult},
    models::{CreateReservation, Reservation, ReservationStatus},
};

pub const INVALID_BOOK_ID: &str = "Please enter a valid Book ID";
pub const ALREADY_RESERVED: &str = "The book is already reserved";
pub const NOT_RESERVED: &str = "The book is not reserved";

/// Status change requested on a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Reserve,
    Return,
}

impl Transition {
    /// Status of the event this transition appends
    pub fn target_status(self) -> ReservationStatus {
        match self {
            Transition::Reserve => ReservationStatus::CheckedOut,
            Transition::Return => ReservationStatus::Returned,
        }
    }

    /// Decide the event to append given the book's latest event.
    ///
    /// Reserving requires the book to be available, returning requires it to
    /// be checked out. A rejected transition leaves the ledger untouched.
    /// The new event is never dated before `latest`, so it always becomes the
    /// book's latest event even when `at` lags behind the stored history.
    pub fn plan(
        self,
        book_id: i32,
        latest: Option<&Reservation>,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<CreateReservation> {
        match (self, BookState::from_latest(latest)) {
            (Transition::Reserve, BookState::CheckedOut) => {
                Err(AppError::BusinessRule(ALREADY_RESERVED.to_string()))
            }
            (Transition::Return, BookState::Available) => {
                Err(AppError::BusinessRule(NOT_RESERVED.to_string()))
            }
            _ => Ok(CreateReservation {
                book_id,
                status_changing_date: latest
                    .map_or(at, |latest| at.max(latest.status_changing_date)),
                status: self.target_status(),
                comment,
            }),
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Reserve => write!(f, "reserve"),
            Transition::Return => write!(f, "return"),
        }
    }
}
