//! # pagelinks-orm: data-access layer for pagelinks
//!
//! Backend-neutral pool and row traits, a PostgreSQL backend on sqlx,
//! validated identifiers for runtime-resolved table and column names, and a
//! SELECT builder that always binds values as parameters.

pub mod backends;
pub mod error;
pub mod query;
pub mod security;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export core traits and types
pub use backends::{
    DatabaseBackend, DatabasePool, DatabasePoolConfig, DatabasePoolStats, DatabaseRow,
    DatabaseRowExt, DatabaseValue, PostgresBackend, SqlDialect,
};
pub use error::*;
pub use query::QueryBuilder;
pub use security::{ColumnRef, Identifier};
