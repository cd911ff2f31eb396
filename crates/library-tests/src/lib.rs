//! Integration tests for the Library Dashboard API.
//!
//! These tests require the API server to be running. Configure the server URL
//! via the `API_BASE_URL` environment variable (default: `http://localhost:8080`).

use library_client::{ClientConfig, LibraryClient, NewBook};
use std::time::Duration;

/// Gets the API base URL from environment or uses default.
#[must_use]
pub fn get_api_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Creates a test client configured for the API.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_test_client() -> Result<LibraryClient, library_client::Error> {
    LibraryClient::new(ClientConfig {
        base_url: get_api_url(),
        timeout: Duration::from_secs(10),
        ..Default::default()
    })
}

/// Generates a unique book title so tests do not collide on the shared
/// collection.
#[must_use]
pub fn unique_title(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{} {} {}", prefix, ts, counter)
}

/// A candidate book with a unique title.
#[must_use]
pub fn unique_book(prefix: &str) -> NewBook {
    NewBook::new(unique_title(prefix), "Integration Author", 2001)
}
