//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Free-form note about the book
    pub note: Option<String>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 3, max = 150, message = "Title must be between 3 and 150 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author is required (at most 100 characters)"))]
    pub author: String,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Update book request. Replaces title, author and note; the id never changes.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 3, max = 150, message = "Title must be between 3 and 150 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author is required (at most 100 characters)"))]
    pub author: String,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Search query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookSearchQuery {
    /// Case-insensitive text matched against title or author
    pub search_term: Option<String>,
}

impl BookSearchQuery {
    /// Search term as given, `None` when missing or blank
    pub fn term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .filter(|term| !term.trim().is_empty())
    }
}
