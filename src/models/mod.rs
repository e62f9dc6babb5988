//! Data models for the book reservation server

pub mod book;
pub mod reservation;

// Re-export commonly used types
pub use book::{Book, BookSearchQuery, CreateBook, UpdateBook};
pub use reservation::{
    CreateReservation, Reservation, ReservationHistory, ReservationStatus, ReservedBook,
    TransitionQuery, UpdateReservation,
};
