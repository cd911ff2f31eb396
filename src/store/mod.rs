//! Book storage backends.
//!
//! Handlers talk to the collection through the [`BookStore`] trait so the same
//! routes run against PostgreSQL in production and an in-memory collection in
//! tests or when no database is configured.

mod memory;
mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

use crate::models::{Book, BookPatch, NewBook};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Storage-layer failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (pool exhausted, closed, or I/O failure).
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// The store rejected or failed a query.
    #[error("query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// A collection of book records.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Checks that the store can serve queries.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Returns every record in insertion order.
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    /// Returns the record with the given identifier, if any.
    async fn get(&self, id: Uuid) -> Result<Option<Book>, StoreError>;

    /// Inserts every candidate whose title is not already stored and returns
    /// the inserted records in input order.
    ///
    /// The existence check and the inserts run under exclusive access, so
    /// concurrent batches cannot both insert the same pre-existing-free title.
    /// Titles repeated inside `candidates` are not deduplicated against each
    /// other.
    async fn bulk_insert(&self, candidates: Vec<NewBook>) -> Result<Vec<Book>, StoreError>;

    /// Applies `patch` to the record and returns the updated record, or
    /// `None` when no record has that identifier.
    async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Option<Book>, StoreError>;

    /// Deletes the record. Returns false when no record has that identifier.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
