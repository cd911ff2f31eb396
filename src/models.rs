//! Request and response models for the REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ============================================================================
// Books
// ============================================================================

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Book title. Treated as the dedup key by bulk insert.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Year of publication.
    pub year_published: i32,
}

impl Book {
    /// Assigns a fresh identifier to a candidate record.
    #[must_use]
    pub fn from_new(new: NewBook) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            author: new.author,
            year_published: new.year_published,
        }
    }

    /// Overwrites the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(year) = patch.year_published {
            self.year_published = year;
        }
    }
}

/// Candidate record accepted by the bulk insert endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Year of publication.
    pub year_published: i32,
}

/// Partial update for a book. Omitted or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New author.
    #[serde(default)]
    pub author: Option<String>,
    /// New year of publication.
    #[serde(default)]
    pub year_published: Option<i32>,
}

impl BookPatch {
    /// Returns true when the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year_published.is_none()
    }
}

/// Plain confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

// ============================================================================
// Dashboard
// ============================================================================

/// A company shown on the candle dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompanySummary {
    /// Display name.
    pub name: String,
    /// Ticker symbol used to request candles.
    pub symbol: String,
}

/// Response for listing dashboard companies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompaniesListResponse {
    /// Companies in display order.
    pub companies: Vec<CompanySummary>,
}

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("healthy" or "degraded").
    pub status: String,
    /// Service version.
    pub version: String,
    /// Active storage backend ("postgres" or "memory").
    pub storage: String,
}
