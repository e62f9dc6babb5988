//! Latest-event derivation

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{Reservation, ReservationStatus};

/// Availability of a book as seen through its ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    Available,
    CheckedOut,
}

impl BookState {
    /// State implied by the latest event; a book without history is available.
    pub fn from_latest(latest: Option<&Reservation>) -> Self {
        match latest.map(|r| r.status) {
            Some(ReservationStatus::CheckedOut) => BookState::CheckedOut,
            Some(ReservationStatus::Returned) | None => BookState::Available,
        }
    }
}

// Later date wins; on equal dates the higher id wins.
fn order_key(reservation: &Reservation) -> (DateTime<Utc>, i32) {
    (reservation.status_changing_date, reservation.id)
}

/// Latest event among `events`
pub fn latest<'a, I>(events: I) -> Option<&'a Reservation>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    events.into_iter().max_by_key(|r| order_key(r))
}

/// Latest event of every book that has at least one event, keyed by book id
pub fn latest_by_book(events: &[Reservation]) -> BTreeMap<i32, &Reservation> {
    let mut latest: BTreeMap<i32, &Reservation> = BTreeMap::new();
    for event in events {
        latest
            .entry(event.book_id)
            .and_modify(|current| {
                if order_key(event) > order_key(current) {
                    *current = event;
                }
            })
            .or_insert(event);
    }
    latest
}

/// Books whose latest event is a checkout, with that event
pub fn checked_out_by_book(events: &[Reservation]) -> BTreeMap<i32, &Reservation> {
    latest_by_book(events)
        .into_iter()
        .filter(|(_, r)| BookState::from_latest(Some(*r)) == BookState::CheckedOut)
        .collect()
}
