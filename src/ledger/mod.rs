//! Reservation ledger logic.
//!
//! Reservations form an append-only event log per book. Everything the service
//! knows about availability is derived here by reducing that log: the latest
//! event of a book decides its [`BookState`], [`Transition`] decides which
//! event a reserve or return appends, and the projections join the log with
//! the catalog. Nothing in this module touches storage.

mod projection;
mod state;
mod transition;

pub use projection::{available_books, reservation_history, reserved_books};
pub use state::{checked_out_by_book, latest, latest_by_book, BookState};
pub use transition::{Transition, ALREADY_RESERVED, INVALID_BOOK_ID, NOT_RESERVED};
