//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookSearchQuery, CreateBook, UpdateBook},
    repository::Repository,
};

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const EMPTY_SEARCH: &str = "Please enter search data";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = created.id, "Book created");
        Ok(created)
    }

    /// Replace title, author and note of an existing book
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()?;
        self.repository
            .books
            .update(id, &book)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Delete a book together with its reservation history
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()));
        }
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Search books by title or author
    pub async fn search_books(&self, query: &BookSearchQuery) -> AppResult<Vec<Book>> {
        let term = query
            .term()
            .ok_or_else(|| AppError::BadRequest(EMPTY_SEARCH.to_string()))?;
        tracing::debug!("Searching books for {:?}", term);
        self.repository.books.search(term).await
    }
}
