//! Unit tests for error module.

use super::*;

// ============================================================================
// ErrorResponse Tests
// ============================================================================

#[test]
fn test_error_response_serialization() {
    let response = ErrorResponse {
        error: "Something went wrong".to_string(),
        code: "STORAGE_UNAVAILABLE".to_string(),
    };

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"error\":\"Something went wrong\""));
    assert!(json.contains("\"code\":\"STORAGE_UNAVAILABLE\""));
}

// ============================================================================
// ApiError Display Tests
// ============================================================================

#[test]
fn test_api_error_invalid_request_display() {
    let error = ApiError::InvalidRequest("expected an array of books".to_string());
    assert_eq!(
        format!("{}", error),
        "Invalid request: expected an array of books"
    );
}

#[test]
fn test_api_error_book_not_found_display() {
    let error = ApiError::book_not_found();
    assert_eq!(format!("{}", error), "Book not found");
}

#[test]
fn test_api_error_all_duplicates_display() {
    let error = ApiError::AllDuplicates;
    assert_eq!(
        format!("{}", error),
        "No new books added, all titles already exist"
    );
}

#[test]
fn test_api_error_storage_unavailable_display() {
    let error = ApiError::StorageUnavailable("Connection refused".to_string());
    assert_eq!(
        format!("{}", error),
        "Storage unavailable: Connection refused"
    );
}

// ============================================================================
// ApiError IntoResponse Tests
// ============================================================================

#[test]
fn test_api_error_invalid_request_into_response() {
    let error = ApiError::InvalidRequest("Bad input".to_string());
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_api_error_not_found_into_response() {
    let error = ApiError::book_not_found();
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_api_error_all_duplicates_into_response() {
    let error = ApiError::AllDuplicates;
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn test_api_error_storage_unavailable_into_response() {
    let error = ApiError::StorageUnavailable("DB error".to_string());
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Conversion Tests
// ============================================================================

#[test]
fn test_store_error_maps_to_storage_unavailable() {
    let error: ApiError = StoreError::Unavailable("pool timed out".to_string()).into();
    assert!(matches!(error, ApiError::StorageUnavailable(_)));
    assert_eq!(
        error.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_api_error_debug() {
    let error = ApiError::NotFound("Book not found".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("NotFound"));
    assert!(debug.contains("Book not found"));
}
