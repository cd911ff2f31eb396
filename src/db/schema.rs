//! Database schema types.

use crate::models::Book;
use sqlx::FromRow;
use uuid::Uuid;

/// Column list selected for every book query, in [`BookRow`] order.
pub const BOOK_COLUMNS: &str = "id, title, author, year_published";

/// Book row from the `books` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    /// Unique identifier.
    pub id: Uuid,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Year of publication.
    pub year_published: i32,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            year_published: row.year_published,
        }
    }
}
