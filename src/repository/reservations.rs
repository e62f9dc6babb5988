//! Reservations repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    ledger::{self, Transition, INVALID_BOOK_ID},
    models::{CreateReservation, Reservation, UpdateReservation},
};

const COLUMNS: &str = "id, book_id, status_changing_date, status, comment";

/// Storage of the reservation ledger.
///
/// `create`, `update` and `delete` are raw row primitives and do not check the
/// checkout/return rule; only `append_transition` does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Every reservation row ordered by id
    async fn list(&self) -> AppResult<Vec<Reservation>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Reservation>>;
    async fn create(&self, reservation: &CreateReservation) -> AppResult<Reservation>;
    async fn update(&self, id: i32, reservation: &UpdateReservation) -> AppResult<Option<Reservation>>;
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Latest row of every book that has one, ordered by book id
    async fn list_latest(&self) -> AppResult<Vec<Reservation>> {
        let events = self.list().await?;
        Ok(ledger::latest_by_book(&events).into_values().cloned().collect())
    }

    /// Check the book's latest state and append the transition's row, atomically per book.
    ///
    /// Fails with `INVALID_BOOK_ID` when the book does not exist and with the
    /// ledger's business rule error when the transition is not allowed.
    async fn append_transition(
        &self,
        book_id: i32,
        transition: Transition,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<Reservation>;
}

#[derive(Clone)]
pub struct PgReservationRepository {
    pool: Pool<Postgres>,
}

impl PgReservationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Foreign key violations mean the referenced book is gone
fn map_book_reference(error: sqlx::Error) -> AppError {
    match error.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => AppError::BadRequest(INVALID_BOOK_ID.to_string()),
        _ => AppError::Database(error),
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn list(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations ORDER BY id",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, reservation: &CreateReservation) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(&format!(
            r#"
            INSERT INTO reservations (book_id, status_changing_date, status, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(reservation.book_id)
        .bind(reservation.status_changing_date)
        .bind(reservation.status)
        .bind(&reservation.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(map_book_reference)
    }

    async fn update(&self, id: i32, reservation: &UpdateReservation) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            r#"
            UPDATE reservations
            SET book_id = $1, status_changing_date = $2, status = $3, comment = $4
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(reservation.book_id)
        .bind(reservation.status_changing_date)
        .bind(reservation.status)
        .bind(&reservation.comment)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_book_reference)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_transition(
        &self,
        book_id: i32,
        transition: Transition,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        // The row lock serializes concurrent transitions on the same book
        let locked: Option<i32> = sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(AppError::BadRequest(INVALID_BOOK_ID.to_string()));
        }

        let history = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations WHERE book_id = $1",
            COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&mut *tx)
        .await?;

        let next = transition.plan(book_id, ledger::latest(&history), comment, at)?;

        let row = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            INSERT INTO reservations (book_id, status_changing_date, status, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(next.book_id)
        .bind(next.status_changing_date)
        .bind(next.status)
        .bind(&next.comment)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }
}
