//! In-memory repositories used by the service and router tests

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{BookRepository, Repository, ReservationRepository};
use crate::{
    error::{AppError, AppResult},
    ledger::{self, Transition, INVALID_BOOK_ID},
    models::{Book, CreateBook, CreateReservation, Reservation, UpdateBook, UpdateReservation},
};

#[derive(Default)]
struct Tables {
    books: BTreeMap<i32, Book>,
    reservations: BTreeMap<i32, Reservation>,
    last_book_id: i32,
    last_reservation_id: i32,
}

impl Tables {
    fn insert_reservation(&mut self, row: &CreateReservation) -> Reservation {
        self.last_reservation_id += 1;
        let reservation = Reservation {
            id: self.last_reservation_id,
            book_id: row.book_id,
            status_changing_date: row.status_changing_date,
            status: row.status,
            comment: row.comment.clone(),
        };
        self.reservations.insert(reservation.id, reservation.clone());
        reservation
    }
}

/// Case-insensitive substring match on title or author, like ILIKE '%term%'
fn matches(book: &Book, term: &str) -> bool {
    let needle = term.to_lowercase();
    book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
}

/// Both tables behind one lock, so transitions are atomic
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(&self) -> Repository {
        Repository::from_parts(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    /// Number of reservation rows, for asserting that nothing was appended
    pub async fn reservation_count(&self) -> usize {
        self.tables.lock().await.reservations.len()
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.lock().await.books.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.tables.lock().await.books.get(&id).cloned())
    }

    async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tables = self.tables.lock().await;
        tables.last_book_id += 1;
        let created = Book {
            id: tables.last_book_id,
            title: book.title.clone(),
            author: book.author.clone(),
            note: book.note.clone(),
        };
        tables.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Option<Book>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.books.get_mut(&id).map(|existing| {
            existing.title = book.title.clone();
            existing.author = book.author.clone();
            existing.note = book.note.clone();
            existing.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.books.remove(&id).is_none() {
            return Ok(false);
        }
        tables.reservations.retain(|_, r| r.book_id != id);
        Ok(true)
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Book>> {
        Ok(self
            .tables
            .lock()
            .await
            .books
            .values()
            .filter(|book| matches(book, term))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.tables.lock().await.reservations.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Reservation>> {
        Ok(self.tables.lock().await.reservations.get(&id).cloned())
    }

    async fn create(&self, reservation: &CreateReservation) -> AppResult<Reservation> {
        let mut tables = self.tables.lock().await;
        if !tables.books.contains_key(&reservation.book_id) {
            return Err(AppError::BadRequest(INVALID_BOOK_ID.to_string()));
        }
        Ok(tables.insert_reservation(reservation))
    }

    async fn update(&self, id: i32, reservation: &UpdateReservation) -> AppResult<Option<Reservation>> {
        let mut tables = self.tables.lock().await;
        if !tables.reservations.contains_key(&id) {
            return Ok(None);
        }
        if !tables.books.contains_key(&reservation.book_id) {
            return Err(AppError::BadRequest(INVALID_BOOK_ID.to_string()));
        }
        Ok(tables.reservations.get_mut(&id).map(|existing| {
            existing.book_id = reservation.book_id;
            existing.status_changing_date = reservation.status_changing_date;
            existing.status = reservation.status;
            existing.comment = reservation.comment.clone();
            existing.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.lock().await.reservations.remove(&id).is_some())
    }

    async fn append_transition(
        &self,
        book_id: i32,
        transition: Transition,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let mut tables = self.tables.lock().await;
        if !tables.books.contains_key(&book_id) {
            return Err(AppError::BadRequest(INVALID_BOOK_ID.to_string()));
        }

        let latest = ledger::latest(tables.reservations.values().filter(|r| r.book_id == book_id));
        let next = transition.plan(book_id, latest, comment, at)?;
        Ok(tables.insert_reservation(&next))
    }
}
