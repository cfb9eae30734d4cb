//! Error types for the data-access layer
//!
//! Provides error handling for database operations, identifier validation
//! and query building.

use std::fmt;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// ORM error type alias
pub type OrmError = ModelError;

/// ORM result type alias
pub type OrmResult<T> = ModelResult<T>;

/// Error types for ORM operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Database connection or query error
    Database(String),
    /// Column missing from a result row
    ColumnNotFound(String),
    /// Identifier or value validation failed
    Validation(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Connection pool error
    Connection(String),
    /// Query building or execution error
    Query(String),
    /// Configuration error
    Configuration(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Database(msg) => write!(f, "Database error: {}", msg),
            ModelError::ColumnNotFound(msg) => write!(f, "Column not found: {}", msg),
            ModelError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ModelError::Connection(msg) => write!(f, "Connection error: {}", msg),
            ModelError::Query(msg) => write!(f, "Query error: {}", msg),
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

// Convert from sqlx errors
impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnNotFound(column) => ModelError::ColumnNotFound(column),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ModelError::Connection(err.to_string())
            }
            other => ModelError::Database(other.to_string()),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

/// Error types for query builder operations
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Missing required clause
    MissingClause(String),
    /// Invalid parameter binding
    InvalidParameter(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::MissingClause(msg) => write!(f, "Missing clause: {}", msg),
            QueryError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for ModelError {
    fn from(err: QueryError) -> Self {
        ModelError::Query(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ModelError::ColumnNotFound("entry_id".to_string()).to_string(),
            "Column not found: entry_id"
        );
        assert_eq!(
            ModelError::Validation("bad".to_string()).to_string(),
            "Validation error: bad"
        );
    }

    #[test]
    fn test_query_error_converts_to_model_error() {
        let err: ModelError = QueryError::MissingClause("FROM".to_string()).into();
        assert_eq!(err, ModelError::Query("Missing clause: FROM".to_string()));
    }

    #[test]
    fn test_sqlx_column_not_found_is_preserved() {
        let err: ModelError = sqlx::Error::ColumnNotFound("slug".to_string()).into();
        assert_eq!(err, ModelError::ColumnNotFound("slug".to_string()));
    }

    #[test]
    fn test_serde_json_error_is_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: ModelError = parse.unwrap_err().into();
        assert!(matches!(err, ModelError::Serialization(_)));
    }
}
