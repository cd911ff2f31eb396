//! Application state management.

use crate::config::Config;
use crate::db::DatabasePool;
use crate::models::CompanySummary;
use crate::store::{BookStore, MemoryBookStore, PgBookStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The book collection.
    pub books: Arc<dyn BookStore>,
    /// Database pool, when the collection is backed by PostgreSQL.
    pub db: Option<DatabasePool>,
    /// Companies listed on the dashboard.
    pub companies: Arc<Vec<CompanySummary>>,
}

impl AppState {
    /// Creates a new application state with an in-memory collection.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryBookStore::new()), None, &Config::default())
    }

    /// Creates a new application state backed by the database.
    #[must_use]
    pub fn with_database(db: DatabasePool, config: &Config) -> Self {
        let store = Arc::new(PgBookStore::new(db.clone()));
        Self::with_store(store, Some(db), config)
    }

    /// Creates a new application state from configuration.
    ///
    /// Connects the pool once when a database URL is configured; the pool is
    /// then shared by every request.
    ///
    /// # Errors
    /// Returns error if the database cannot be reached or migrated.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let Some(url) = config.database.url.as_deref() else {
            warn!("No database URL configured, using the in-memory book store");
            return Ok(Self::with_store(
                Arc::new(MemoryBookStore::new()),
                None,
                config,
            ));
        };

        let db = DatabasePool::connect(url, &config.database).await?;
        if config.database.run_migrations {
            db.run_migrations().await?;
        }
        info!("Using the PostgreSQL book store");

        Ok(Self::with_database(db, config))
    }

    fn with_store(books: Arc<dyn BookStore>, db: Option<DatabasePool>, config: &Config) -> Self {
        Self {
            books,
            db,
            companies: Arc::new(config.company_summaries()),
        }
    }

    /// Releases the database pool, if any.
    pub async fn shutdown(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
