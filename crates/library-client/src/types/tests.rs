//! Unit tests for types module.

use super::*;

// ============================================================================
// Book Tests
// ============================================================================

#[test]
fn test_book_deserialization() {
    let json = r#"{
        "id": "6f1c2a64-3d5e-4b8f-9a0b-1c2d3e4f5a6b",
        "title": "Dune",
        "author": "Frank Herbert",
        "yearPublished": 1965
    }"#;

    let book: Book = serde_json::from_str(json).unwrap();
    assert_eq!(book.id.to_string(), "6f1c2a64-3d5e-4b8f-9a0b-1c2d3e4f5a6b");
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Frank Herbert");
    assert_eq!(book.year_published, 1965);
}

#[test]
fn test_new_book_serialization() {
    let book = NewBook::new("Emma", "Jane Austen", 1815);

    let json = serde_json::to_string(&book).unwrap();
    assert!(json.contains("\"title\":\"Emma\""));
    assert!(json.contains("\"author\":\"Jane Austen\""));
    assert!(json.contains("\"yearPublished\":1815"));
}

#[test]
fn test_new_book_from_book() {
    let book = Book {
        id: Uuid::new_v4(),
        title: "Emma".to_string(),
        author: "Jane Austen".to_string(),
        year_published: 1815,
    };

    assert_eq!(NewBook::from(&book), NewBook::new("Emma", "Jane Austen", 1815));
}

#[test]
fn test_book_patch_skips_unset_fields() {
    let patch = BookPatch {
        year_published: Some(1816),
        ..Default::default()
    };

    let json = serde_json::to_string(&patch).unwrap();
    assert_eq!(json, r#"{"yearPublished":1816}"#);
}

#[test]
fn test_empty_book_patch_serializes_to_empty_object() {
    let json = serde_json::to_string(&BookPatch::default()).unwrap();
    assert_eq!(json, "{}");
}

// ============================================================================
// Dashboard Type Tests
// ============================================================================

#[test]
fn test_company_label() {
    let company = CompanySummary {
        name: "Apple".to_string(),
        symbol: "AAPL".to_string(),
    };
    assert_eq!(company.label(), "Apple (AAPL)");
}

#[test]
fn test_candle_response_ok() {
    let json = r#"{"s":"ok","t":[1704067200,1704067260],"c":[185.5,186.25]}"#;

    let candles: CandleResponse = serde_json::from_str(json).unwrap();
    assert!(candles.is_ok());
    assert_eq!(candles.t, vec![1704067200, 1704067260]);
    assert_eq!(candles.c, vec![185.5, 186.25]);
}

#[test]
fn test_candle_response_no_data() {
    let candles: CandleResponse = serde_json::from_str(r#"{"s":"no_data"}"#).unwrap();
    assert!(!candles.is_ok());
    assert!(candles.t.is_empty());
    assert!(candles.c.is_empty());
}
