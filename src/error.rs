//! Error types for the REST API.

use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[cfg(test)]
mod tests;

/// API error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request shape.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No record matches the identifier.
    #[error("{0}")]
    NotFound(String),

    /// A bulk insert produced no new records.
    #[error("No new books added, all titles already exist")]
    AllDuplicates,

    /// The store could not serve the request.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl ApiError {
    /// The 404 returned by every identifier-keyed book route.
    #[must_use]
    pub fn book_not_found() -> Self {
        ApiError::NotFound("Book not found".to_string())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::AllDuplicates => (StatusCode::CONFLICT, "ALL_DUPLICATES"),
            ApiError::StorageUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_UNAVAILABLE")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        error!("Storage error: {}", err);
        ApiError::StorageUnavailable(err.to_string())
    }
}
