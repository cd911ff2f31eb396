//! In-memory book store.

use super::{BookStore, StoreError};
use crate::ingest::{candidate_titles, select_insertable};
use crate::models::{Book, BookPatch, NewBook};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Book collection held in process memory.
///
/// Records are kept in insertion order. Used when no database URL is
/// configured and by the handler tests.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            books: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// Returns true when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.read().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        Ok(self.books.read().iter().find(|b| b.id == id).cloned())
    }

    async fn bulk_insert(&self, candidates: Vec<NewBook>) -> Result<Vec<Book>, StoreError> {
        let mut books = self.books.write();

        let titles: HashSet<String> = candidate_titles(&candidates).into_iter().collect();
        let existing: HashSet<String> = books
            .iter()
            .filter(|b| titles.contains(&b.title))
            .map(|b| b.title.clone())
            .collect();

        let inserted: Vec<Book> = select_insertable(candidates, &existing)
            .into_iter()
            .map(Book::from_new)
            .collect();
        books.extend(inserted.iter().cloned());

        debug!(
            "Memory store inserted {} books ({} titles already present)",
            inserted.len(),
            existing.len()
        );
        Ok(inserted)
    }

    async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write();
        Ok(books.iter_mut().find(|b| b.id == id).map(|book| {
            book.apply(patch);
            book.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut books = self.books.write();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn candidate(title: &str, author: &str, year: i32) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            year_published: year,
        }
    }

    #[tokio::test]
    async fn test_bulk_insert_then_get_round_trip() {
        let store = MemoryBookStore::new();
        let inserted = store
            .bulk_insert(vec![candidate("Dune", "Frank Herbert", 1965)])
            .await
            .unwrap();
        assert_eq!(inserted.len(), 1);

        let fetched = store.get(inserted[0].id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Dune");
        assert_eq!(fetched.author, "Frank Herbert");
        assert_eq!(fetched.year_published, 1965);
    }

    #[tokio::test]
    async fn test_bulk_insert_skips_existing_titles() {
        let store = MemoryBookStore::new();
        store
            .bulk_insert(vec![candidate("A", "X", 2000)])
            .await
            .unwrap();

        let inserted = store
            .bulk_insert(vec![candidate("A", "Y", 2001), candidate("B", "Y", 2002)])
            .await
            .unwrap();

        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].title, "B");
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_insert_keeps_in_batch_duplicates() {
        let store = MemoryBookStore::new();
        let inserted = store
            .bulk_insert(vec![candidate("A", "X", 2000), candidate("A", "Z", 2010)])
            .await
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert_ne!(inserted[0].id, inserted[1].id);
        assert_eq!(inserted[0].author, "X");
        assert_eq!(inserted[1].author, "Z");
    }

    #[tokio::test]
    async fn test_concurrent_bulk_inserts_do_not_duplicate() {
        let store = Arc::new(MemoryBookStore::new());

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .bulk_insert(vec![candidate("Shared", "X", 2000 + i)])
                    .await
                    .unwrap()
                    .len()
            }));
        }

        let mut total = 0;
        for handle in handles {
            total += handle.await.unwrap();
        }

        assert_eq!(total, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryBookStore::new();
        store
            .bulk_insert(vec![candidate("C", "X", 1), candidate("A", "X", 2)])
            .await
            .unwrap();
        store
            .bulk_insert(vec![candidate("B", "X", 3)])
            .await
            .unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryBookStore::new();
        let result = store
            .update(Uuid::new_v4(), BookPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryBookStore::new();
        let inserted = store
            .bulk_insert(vec![candidate("A", "X", 2000)])
            .await
            .unwrap();

        assert!(store.delete(inserted[0].id).await.unwrap());
        assert!(!store.delete(inserted[0].id).await.unwrap());
        assert!(store.is_empty());
    }
}
