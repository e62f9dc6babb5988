//! Read projections joining the ledger with the catalog.
//!
//! Books are emitted in the order they are given (the repositories list them
//! by id). Events referring to books absent from `books` are ignored.

use std::collections::BTreeMap;

use super::state::checked_out_by_book;
use crate::models::{Book, Reservation, ReservationHistory, ReservedBook};

/// Books whose latest event is a checkout, with that checkout's comment
pub fn reserved_books(books: &[Book], events: &[Reservation]) -> Vec<ReservedBook> {
    let checked_out = checked_out_by_book(events);
    books
        .iter()
        .filter_map(|book| {
            checked_out.get(&book.id).map(|latest| ReservedBook {
                id: book.id,
                title: book.title.clone(),
                author: book.author.clone(),
                reservation_comment: latest.comment.clone(),
            })
        })
        .collect()
}

/// Books not currently checked out, including books without history
pub fn available_books(books: &[Book], events: &[Reservation]) -> Vec<Book> {
    let checked_out = checked_out_by_book(events);
    books
        .iter()
        .filter(|book| !checked_out.contains_key(&book.id))
        .cloned()
        .collect()
}

/// Every book with at least one event, with all of its events oldest first
pub fn reservation_history(books: &[Book], events: &[Reservation]) -> Vec<ReservationHistory> {
    let mut by_book: BTreeMap<i32, Vec<Reservation>> = BTreeMap::new();
    for event in events {
        by_book.entry(event.book_id).or_default().push(event.clone());
    }

    books
        .iter()
        .filter_map(|book| {
            let mut reservations = by_book.remove(&book.id)?;
            reservations.sort_by_key(|r| (r.status_changing_date, r.id));
            Some(ReservationHistory {
                id: book.id,
                title: book.title.clone(),
                author: book.author.clone(),
                comment: book.note.clone(),
                reservations,
            })
        })
        .collect()
}
