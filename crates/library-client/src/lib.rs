//! HTTP client library for the Library Dashboard API.
//!
//! This crate provides a typed HTTP client for the book collection endpoints
//! and the candle dashboard that charts stock candles for a fixed list of
//! companies.
//!
//! # Example
//!
//! ```no_run
//! use library_client::{ClientConfig, LibraryClient, NewBook};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), library_client::Error> {
//!     let client = LibraryClient::new(ClientConfig::default())?;
//!
//!     let inserted = client
//!         .create_books(&[NewBook {
//!             title: "Dune".into(),
//!             author: "Frank Herbert".into(),
//!             year_published: 1965,
//!         }])
//!         .await?;
//!     println!("Inserted {} books", inserted.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
pub mod dashboard;
mod error;
mod types;

pub use client::{ClientConfig, LibraryClient};
pub use dashboard::{CandleSource, ChartSlot, ChartSurface, ConfigSurface, Dashboard, LineChart};
pub use error::Error;
pub use types::*;
