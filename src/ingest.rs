//! Request body parsing and bulk book ingestion.
//!
//! A bulk insert is a two-step operation run by each [`BookStore`](crate::store::BookStore)
//! under exclusive access:
//!
//! 1. Look up which candidate titles already exist in the collection.
//! 2. Walk the candidates in input order and persist every one whose title was
//!    not in that set.
//!
//! The set from step 1 is computed once per batch and is not updated while
//! inserting, so a title repeated inside one batch is inserted every time it
//! appears.

use crate::error::ApiError;
use crate::models::{BookPatch, NewBook};
use serde_json::Value;
use std::collections::HashSet;

/// Parses a bulk insert request body.
///
/// # Errors
/// Returns [`ApiError::InvalidRequest`] when the body is not a JSON array, or
/// when an element is not an object carrying every required field.
pub fn parse_candidates(body: &[u8]) -> Result<Vec<NewBook>, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| not_an_array())?;

    let Value::Array(items) = value else {
        return Err(not_an_array());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ApiError::InvalidRequest(format!(
                    "book at index {} must be an object",
                    index
                )));
            }
            serde_json::from_value::<NewBook>(item).map_err(|e| {
                ApiError::InvalidRequest(format!("book at index {}: {}", index, e))
            })
        })
        .collect()
}

/// Parses an update request body.
///
/// Serde would read a struct from a JSON array by position, so anything but
/// an object is rejected before decoding.
///
/// # Errors
/// Returns [`ApiError::InvalidRequest`] when the body is not a JSON object or
/// a field has the wrong type.
pub fn parse_patch(body: &[u8]) -> Result<BookPatch, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid book fields: {}", e)))?;

    if !value.is_object() {
        return Err(ApiError::InvalidRequest(
            "Invalid input, expected a book object".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid book fields: {}", e)))
}

fn not_an_array() -> ApiError {
    ApiError::InvalidRequest("Invalid input, expected an array of books".to_string())
}

/// Distinct candidate titles, in first-seen order, for the existence lookup.
#[must_use]
pub fn candidate_titles(candidates: &[NewBook]) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|book| seen.insert(book.title.as_str()))
        .map(|book| book.title.clone())
        .collect()
}

/// Keeps the candidates whose title is not in `existing`, preserving order.
#[must_use]
pub fn select_insertable(candidates: Vec<NewBook>, existing: &HashSet<String>) -> Vec<NewBook> {
    candidates
        .into_iter()
        .filter(|book| !existing.contains(&book.title))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "X".to_string(),
            year_published: 2000,
        }
    }

    #[test]
    fn test_parse_candidates_array() {
        let body = br#"[{"title":"A","author":"X","yearPublished":2000}]"#;
        let candidates = parse_candidates(body).unwrap();
        assert_eq!(candidates, vec![book("A")]);
    }

    #[test]
    fn test_parse_candidates_empty_array() {
        assert!(parse_candidates(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_candidates_rejects_non_array() {
        let bodies: [&[u8]; 6] = [
            br#"{"title":"A","author":"X","yearPublished":2000}"#,
            b"\"A\"",
            b"42",
            b"null",
            b"not json at all",
            b"",
        ];
        for body in bodies {
            let err = parse_candidates(body).unwrap_err();
            assert!(matches!(err, ApiError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_parse_candidates_rejects_missing_field() {
        let body = br#"[{"title":"A","author":"X","yearPublished":2000},{"title":"B"}]"#;
        let err = parse_candidates(body).unwrap_err();
        match err {
            ApiError::InvalidRequest(msg) => assert!(msg.contains("index 1")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_candidates_rejects_positional_element() {
        let body = br#"[{"title":"A","author":"X","yearPublished":2000},["B","Y",2001]]"#;
        let err = parse_candidates(body).unwrap_err();
        match err {
            ApiError::InvalidRequest(msg) => assert!(msg.contains("index 1")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_patch_object() {
        let patch = parse_patch(br#"{"yearPublished":1816}"#).unwrap();
        assert_eq!(patch.year_published, Some(1816));
        assert!(patch.title.is_none());
        assert!(parse_patch(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_patch_rejects_non_object() {
        let bodies: [&[u8]; 5] = [
            b"[]",
            br#"["Renamed"]"#,
            b"\"Renamed\"",
            b"null",
            b"not json",
        ];
        for body in bodies {
            let err = parse_patch(body).unwrap_err();
            assert!(matches!(err, ApiError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_candidate_titles_distinct_in_order() {
        let titles = candidate_titles(&[book("B"), book("A"), book("B")]);
        assert_eq!(titles, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_select_insertable_skips_existing() {
        let existing: HashSet<String> = ["A".to_string()].into_iter().collect();
        let selected = select_insertable(vec![book("A"), book("B"), book("C")], &existing);
        assert_eq!(selected, vec![book("B"), book("C")]);
    }

    #[test]
    fn test_select_insertable_keeps_in_batch_duplicates() {
        let selected = select_insertable(vec![book("A"), book("A")], &HashSet::new());
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_insertable_all_existing() {
        let existing: HashSet<String> = ["A".to_string(), "B".to_string()].into_iter().collect();
        assert!(select_insertable(vec![book("B"), book("A")], &existing).is_empty());
    }
}
