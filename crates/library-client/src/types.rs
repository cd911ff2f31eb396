//! Request and response types for the library API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
mod tests;

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Active storage backend.
    pub storage: String,
}

// ============================================================================
// Books
// ============================================================================

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Year of publication.
    pub year_published: i32,
}

/// Book submitted to the bulk insert endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Year of publication.
    pub year_published: i32,
}

impl NewBook {
    /// Convenience constructor.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, year_published: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year_published,
        }
    }
}

impl From<&Book> for NewBook {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year_published: book.year_published,
        }
    }
}

/// Partial update for a book. Only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// New year of publication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i32>,
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

// ============================================================================
// Dashboard
// ============================================================================

/// A company shown on the candle dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    /// Display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
}

impl CompanySummary {
    /// Label shown in the company list, e.g. `Apple (AAPL)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// Response for listing dashboard companies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompaniesListResponse {
    /// Companies in display order.
    pub companies: Vec<CompanySummary>,
}

/// Status value of a successful candle response.
pub const CANDLES_OK: &str = "ok";

/// Candle series returned by the candle endpoint.
///
/// Non-`ok` responses usually carry no series, so `t` and `c` default to
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleResponse {
    /// Response status; `"ok"` when the series is usable.
    pub s: String,
    /// Candle timestamps in seconds since epoch.
    #[serde(default)]
    pub t: Vec<i64>,
    /// Close prices, one per timestamp.
    #[serde(default)]
    pub c: Vec<f64>,
}

impl CandleResponse {
    /// Returns true when the series is usable.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.s == CANDLES_OK
    }
}
