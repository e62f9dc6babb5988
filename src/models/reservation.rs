//! Reservation ledger model and derived display types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Status carried by a reservation event (stored as SMALLINT: 0=CheckedOut, 1=Returned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[repr(i16)]
pub enum ReservationStatus {
    CheckedOut = 0,
    Returned = 1,
}

/// One status change of a book. Reserve and return append new rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub book_id: i32,
    pub status_changing_date: DateTime<Utc>,
    pub status: ReservationStatus,
    pub comment: Option<String>,
}

/// Create reservation request, also used for rows appended by reserve/return
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    pub book_id: i32,
    pub status_changing_date: DateTime<Utc>,
    pub status: ReservationStatus,
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,
}

/// Correction of an existing reservation row. Overwrites every field but the id.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateReservation {
    pub book_id: i32,
    pub status_changing_date: DateTime<Utc>,
    pub status: ReservationStatus,
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,
}

/// Optional comment attached to a reserve or return
#[derive(Debug, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct TransitionQuery {
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,
}

/// Book currently checked out, with the comment of its checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReservedBook {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub reservation_comment: Option<String>,
}

/// Book with every reservation event recorded for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReservationHistory {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// The book's note
    pub comment: Option<String>,
    pub reservations: Vec<Reservation>,
}
