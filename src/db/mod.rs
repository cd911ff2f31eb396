//! Database module for PostgreSQL connection and schema.

mod pool;
mod schema;

pub use pool::DatabasePool;
pub use schema::*;
