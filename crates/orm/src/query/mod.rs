//! Query Builder Module - fluent SELECT builder over validated identifiers

pub mod builder;
pub mod execution;
pub mod joins;
pub mod ordering;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::QueryBuilder;
pub use types::{QueryOperator, SelectItem};
