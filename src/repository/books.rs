//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, CreateBook, UpdateBook},
};

/// Storage of catalog entries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books ordered by id
    async fn list(&self) -> AppResult<Vec<Book>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;
    async fn create(&self, book: &CreateBook) -> AppResult<Book>;
    /// Overwrite title, author and note. `None` when the book does not exist.
    async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Option<Book>>;
    /// Returns whether a row was removed. The book's reservations go with it.
    async fn delete(&self, id: i32) -> AppResult<bool>;
    /// Case-insensitive substring match on title or author, ordered by id
    async fn search(&self, term: &str) -> AppResult<Vec<Book>>;
}

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author, note FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT id, title, author, note FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, note)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, note
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.note)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $1, author = $2, note = $3
            WHERE id = $4
            RETURNING id, title, author, note
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.note)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", escape_like(term));
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, note FROM books
            WHERE title ILIKE $1 OR author ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}

/// Escape LIKE wildcards so the term is matched literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
