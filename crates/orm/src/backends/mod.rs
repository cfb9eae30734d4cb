//! Database Backend Abstractions
//!
//! Read-side traits the resolver is written against, plus the PostgreSQL
//! implementation used in production.

pub mod core;
pub mod postgres;

// Re-export core traits and types
pub use self::core::*;
pub use postgres::{PostgresBackend, PostgresPool, PostgresRow};
