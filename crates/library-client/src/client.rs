//! HTTP client for the library API.

use crate::error::Error;
use crate::types::*;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;


/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Base URL the candle endpoint hangs off. Defaults to `{base_url}/api`.
    pub candles_base_url: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            candles_base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Library Dashboard API.
#[derive(Debug, Clone)]
pub struct LibraryClient {
    client: Client,
    base_url: String,
    candles_base_url: String,
}

impl LibraryClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if a base URL is malformed or the HTTP client cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = normalize_base_url(&config.base_url)?;
        let candles_base_url = match config.candles_base_url {
            Some(url) => normalize_base_url(&url)?,
            None => format!("{}/api", base_url),
        };

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            candles_base_url,
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Base URL of the API, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the candle endpoint for a symbol.
    #[must_use]
    pub fn candles_url(&self, symbol: &str) -> String {
        format!("{}/candles/{}", self.candles_base_url, symbol)
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Books
    // ========================================================================

    /// Bulk inserts books and returns the ones that were added.
    ///
    /// # Errors
    /// Returns [`Error::Conflict`] when every title already exists, or error
    /// if the request fails.
    pub async fn create_books(&self, books: &[NewBook]) -> Result<Vec<Book>, Error> {
        let url = format!("{}/api/books", self.base_url);
        let resp = self.client.post(&url).json(books).send().await?;
        self.handle_response(resp).await
    }

    /// Lists all books.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_books(&self) -> Result<Vec<Book>, Error> {
        let url = format!("{}/api/books", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Gets a book by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when no book has that id, or error if the
    /// request fails.
    pub async fn get_book(&self, id: &str) -> Result<Book, Error> {
        let url = format!("{}/api/books/{}", self.base_url, id);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Updates the set fields of a book.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when no book has that id, or error if the
    /// request fails.
    pub async fn update_book(&self, id: &str, patch: &BookPatch) -> Result<Book, Error> {
        let url = format!("{}/api/books/{}", self.base_url, id);
        let resp = self.client.put(&url).json(patch).send().await?;
        self.handle_response(resp).await
    }

    /// Deletes a book.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when no book has that id, or error if the
    /// request fails.
    pub async fn delete_book(&self, id: &str) -> Result<MessageResponse, Error> {
        let url = format!("{}/api/books/{}", self.base_url, id);
        let resp = self.client.delete(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Lists the companies configured for the dashboard.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_companies(&self) -> Result<CompaniesListResponse, Error> {
        let url = format!("{}/api/companies", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Fetches the candle series for a symbol.
    ///
    /// The body is decoded whatever its `s` status; callers decide whether
    /// the series is usable.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not a candle response.
    pub async fn fetch_candles(&self, symbol: &str) -> Result<CandleResponse, Error> {
        let resp = self.client.get(self.candles_url(symbol)).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let text = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => Error::NotFound(text),
            StatusCode::CONFLICT => Error::Conflict(text),
            StatusCode::BAD_REQUEST => Error::InvalidRequest(text),
            _ => Error::Api {
                status: status.as_u16(),
                message: text,
            },
        })
    }
}

/// Validates a base URL and strips its trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, Error> {
    Url::parse(raw)?;
    Ok(raw.trim_end_matches('/').to_string())
}
