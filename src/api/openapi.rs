//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Reservation API",
        version = "1.0.0",
        description = "Reservation services for the books."
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::search_books,
        // Reservations
        reservations::reserve_book,
        reservations::return_book,
        reservations::reserved_books,
        reservations::available_books,
        reservations::reservation_history,
        reservations::latest_reservations,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
    ),
    components(
        schemas(
            // Books
            crate::models::Book,
            crate::models::CreateBook,
            crate::models::UpdateBook,
            // Reservations
            crate::models::Reservation,
            crate::models::ReservationStatus,
            crate::models::CreateReservation,
            crate::models::UpdateReservation,
            crate::models::ReservedBook,
            crate::models::ReservationHistory,
            reservations::TransitionResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "reservations", description = "Reservation ledger")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
