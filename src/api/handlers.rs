//! API request handlers.

use crate::error::{ApiError, ErrorResponse};
use crate::ingest::{parse_candidates, parse_patch};
use crate::models::{
    Book, BookPatch, CompaniesListResponse, HealthResponse, MessageResponse, NewBook,
};
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;


/// Parses a path identifier. Malformed identifiers cannot match any record.
fn parse_book_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::book_not_found())
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = match state.books.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            warn!("Health check could not reach the book store: {}", e);
            "degraded"
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.books.backend().to_string(),
    })
}

// ============================================================================
// Books
// ============================================================================

/// Bulk insert books, skipping titles that already exist.
///
/// Titles are checked against the records present before the call; a title
/// repeated inside the request body is inserted once per occurrence.
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = Vec<NewBook>,
    responses(
        (status = 201, description = "Books inserted", body = Vec<Book>),
        (status = 400, description = "Body is not an array of books", body = ErrorResponse),
        (status = 409, description = "All titles already exist", body = ErrorResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Books"
)]
pub async fn create_books(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Vec<Book>>), ApiError> {
    let candidates = parse_candidates(&body)?;
    let submitted = candidates.len();

    let inserted = state.books.bulk_insert(candidates).await?;
    if inserted.is_empty() {
        info!("Bulk insert of {} books added nothing", submitted);
        return Err(ApiError::AllDuplicates);
    }

    info!(
        "Bulk insert added {} of {} books",
        inserted.len(),
        submitted
    );
    Ok((StatusCode::CREATED, Json(inserted)))
}

/// List all books.
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Books"
)]
pub async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.books.list().await?))
}

/// Get a book by id.
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(
        ("id" = String, Path, description = "Book identifier")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Books"
)]
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&id)?;

    state
        .books
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::book_not_found)
}

/// Update a book by id.
///
/// Fields present in the body overwrite the stored ones; omitted fields are
/// kept. An absent id answers 404 whatever the body.
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(
        ("id" = String, Path, description = "Book identifier")
    ),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Updated book", body = Book),
        (status = 400, description = "Body is not a book object", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Books"
)]
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&id)?;
    if state.books.get(id).await?.is_none() {
        return Err(ApiError::book_not_found());
    }

    let patch = parse_patch(&body)?;
    if patch.is_empty() {
        debug!("Update of book {} sets no fields", id);
    }

    state
        .books
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or_else(ApiError::book_not_found)
}

/// Delete a book by id.
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(
        ("id" = String, Path, description = "Book identifier")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Books"
)]
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_book_id(&id)?;

    if !state.books.delete(id).await? {
        return Err(ApiError::book_not_found());
    }

    info!("Deleted book {}", id);
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}

// ============================================================================
// Dashboard
// ============================================================================

/// List the companies shown on the candle dashboard.
#[utoipa::path(
    get,
    path = "/api/companies",
    responses(
        (status = 200, description = "Dashboard companies", body = CompaniesListResponse)
    ),
    tag = "Dashboard"
)]
pub async fn list_companies(State(state): State<Arc<AppState>>) -> Json<CompaniesListResponse> {
    Json(CompaniesListResponse {
        companies: state.companies.as_ref().clone(),
    })
}
