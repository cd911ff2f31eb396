//! PostgreSQL book store.

use super::{BookStore, StoreError};
use crate::db::{BOOK_COLUMNS, BookRow, DatabasePool};
use crate::ingest::{candidate_titles, select_insertable};
use crate::models::{Book, BookPatch, NewBook};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Book collection stored in the `books` table.
#[derive(Clone)]
pub struct PgBookStore {
    db: DatabasePool,
}

impl PgBookStore {
    /// Creates a store over an established pool.
    #[must_use]
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.db.pool()).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let rows: Vec<BookRow> =
            sqlx::query_as(&format!("SELECT {} FROM books ORDER BY seq", BOOK_COLUMNS))
                .fetch_all(self.db.pool())
                .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?;

        Ok(row.map(Book::from))
    }

    async fn bulk_insert(&self, candidates: Vec<NewBook>) -> Result<Vec<Book>, StoreError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.pool().begin().await?;

        // Serializes concurrent batches; plain reads are not blocked.
        sqlx::query("LOCK TABLE books IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let titles = candidate_titles(&candidates);
        let existing: HashSet<String> =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT title FROM books WHERE title = ANY($1)")
                .bind(&titles)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();

        let mut inserted = Vec::new();
        for candidate in select_insertable(candidates, &existing) {
            let book = Book::from_new(candidate);
            sqlx::query(
                r#"
                INSERT INTO books (id, title, author, year_published)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year_published)
            .execute(&mut *tx)
            .await?;
            inserted.push(book);
        }

        tx.commit().await?;

        debug!(
            "Inserted {} books ({} titles already present)",
            inserted.len(),
            existing.len()
        );
        Ok(inserted)
    }

    async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Option<Book>, StoreError> {
        let row: Option<BookRow> = sqlx::query_as(&format!(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                year_published = COALESCE($4, year_published)
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.author)
        .bind(patch.year_published)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Book::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
