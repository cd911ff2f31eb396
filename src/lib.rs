//! # Library Dashboard Backend - REST API Server
//!
//! A REST API for a small library book collection, built with
//! [Axum](https://crates.io/crates/axum) and backed by PostgreSQL through
//! [sqlx](https://crates.io/crates/sqlx), with OpenAPI/Swagger documentation via
//! [utoipa](https://crates.io/crates/utoipa). The companion `library-client`
//! crate provides a typed client and the candle dashboard.
//!
//! ## Key Features
//!
//! - **Bulk Ingestion**: Insert many books in one request; titles already in
//!   the collection are skipped, and a request that adds nothing is rejected
//!   with `409 Conflict`.
//!
//! - **Book CRUD**: List, fetch, partially update and delete books by id.
//!
//! - **Pluggable Storage**: PostgreSQL when a database URL is configured, an
//!   in-memory collection otherwise.
//!
//! - **OpenAPI Documentation**: Auto-generated Swagger UI at `/swagger-ui/`.
//!
//! - **Structured Logging**: Request tracing with `tower-http`.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers and router configuration |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`db`] | PostgreSQL pool and row types |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`ingest`] | Bulk insert parsing and title deduplication |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`state`] | Application state management |
//! | [`store`] | `BookStore` trait and its backends |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/books` | Bulk insert books |
//! | GET | `/api/books` | List all books |
//! | GET | `/api/books/{id}` | Get a book |
//! | PUT | `/api/books/{id}` | Update a book |
//! | DELETE | `/api/books/{id}` | Delete a book |
//! | GET | `/api/companies` | Dashboard company list |
//!
//! ## Example Usage
//!
//! ```bash
//! # In-memory store
//! cargo run
//!
//! # PostgreSQL store
//! DATABASE_URL=postgres://localhost:5432/lmsdb cargo run
//!
//! # Insert books
//! curl -X POST http://localhost:8080/api/books \
//!   -H "Content-Type: application/json" \
//!   -d '[{"title": "Dune", "author": "Frank Herbert", "yearPublished": 1965}]'
//!
//! # Update the year only
//! curl -X PUT http://localhost:8080/api/books/<id> \
//!   -H "Content-Type: application/json" \
//!   -d '{"yearPublished": 1966}'
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod state;
pub mod store;
