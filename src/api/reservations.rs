//! Reservation endpoints: reserve/return, derived views and raw rows

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, CreateReservation, Reservation, ReservationHistory, ReservedBook, TransitionQuery,
        UpdateReservation,
    },
};

/// Outcome of a reserve or return
#[derive(Serialize, ToSchema)]
pub struct TransitionResponse {
    /// Status message
    pub message: String,
    /// Row appended to the ledger
    pub reservation: Reservation,
}

/// Reserve a book by the book ID
#[utoipa::path(
    post,
    path = "/reservations/reserve/{book_id}",
    tag = "reservations",
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        TransitionQuery
    ),
    responses(
        (status = 200, description = "Reservation completed", body = TransitionResponse),
        (status = 400, description = "Unknown book or book already reserved", body = crate::error::ErrorResponse)
    )
)]
pub async fn reserve_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(book_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<TransitionQuery>, AppError>,
) -> AppResult<Json<TransitionResponse>> {
    let reservation = state.services.reservations.reserve_book(book_id, query).await?;
    Ok(Json(TransitionResponse {
        message: "Reservation completed successfully".to_string(),
        reservation,
    }))
}

/// Return a book by the book ID
#[utoipa::path(
    post,
    path = "/reservations/return/{book_id}",
    tag = "reservations",
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        TransitionQuery
    ),
    responses(
        (status = 200, description = "Return completed", body = TransitionResponse),
        (status = 400, description = "Unknown book or book not reserved", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(book_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<TransitionQuery>, AppError>,
) -> AppResult<Json<TransitionResponse>> {
    let reservation = state.services.reservations.return_book(book_id, query).await?;
    Ok(Json(TransitionResponse {
        message: "Reservation return completed successfully".to_string(),
        reservation,
    }))
}

/// Books currently checked out, with the reservation comment
#[utoipa::path(
    get,
    path = "/reservations/reserved_books",
    tag = "reservations",
    responses(
        (status = 200, description = "Reserved books", body = Vec<ReservedBook>)
    )
)]
pub async fn reserved_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReservedBook>>> {
    let books = state.services.reservations.reserved_books().await?;
    Ok(Json(books))
}

/// Books not currently checked out
#[utoipa::path(
    get,
    path = "/reservations/available_books",
    tag = "reservations",
    responses(
        (status = 200, description = "Available books", body = Vec<Book>)
    )
)]
pub async fn available_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.reservations.available_books().await?;
    Ok(Json(books))
}

/// Reservation history grouped by book
#[utoipa::path(
    get,
    path = "/reservations/history",
    tag = "reservations",
    responses(
        (status = 200, description = "Reservation history", body = Vec<ReservationHistory>)
    )
)]
pub async fn reservation_history(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReservationHistory>>> {
    let history = state.services.reservations.reservation_history().await?;
    Ok(Json(history))
}

/// Latest reservation row of every book
#[utoipa::path(
    get,
    path = "/reservations/latest",
    tag = "reservations",
    responses(
        (status = 200, description = "Latest reservation per book", body = Vec<Reservation>)
    )
)]
pub async fn latest_reservations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.latest_reservations().await?;
    Ok(Json(reservations))
}

/// List all reservation rows
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "All reservations", body = Vec<Reservation>)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.get_reservations().await?;
    Ok(Json(reservations))
}

/// Get a reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get_reservation(id).await?;
    Ok(Json(reservation))
}

/// Insert a reservation row without checking the book's state
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid reservation", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    WithRejection(Json(reservation), _): WithRejection<Json<CreateReservation>, AppError>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let created = state.services.reservations.create_reservation(reservation).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Correct a reservation row
#[utoipa::path(
    put,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservation,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_reservation(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(reservation), _): WithRejection<Json<UpdateReservation>, AppError>,
) -> AppResult<Json<Reservation>> {
    let updated = state.services.reservations.update_reservation(id, reservation).await?;
    Ok(Json(updated))
}

/// Remove a reservation row
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Reservation removed"),
        (status = 404, description = "Invalid reservation", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_reservation(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    state.services.reservations.delete_reservation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
