//! In-memory pool and row doubles for exercising code written against
//! [`DatabasePool`] without a database.
//!
//! Enabled for this crate's own tests and, for dependants, through the
//! `testing` feature.

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::backends::{DatabasePool, DatabasePoolStats, DatabaseRow, DatabaseValue, SqlDialect};
use crate::error::{ModelError, OrmResult};

/// Mock database row with columns kept in select order
#[derive(Debug, Clone, Default)]
pub struct MockDatabaseRow {
    columns: Vec<(String, JsonValue)>,
}

impl MockDatabaseRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column<T: Into<JsonValue>>(mut self, name: &str, value: T) -> Self {
        let value = value.into();
        match self.columns.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((name.to_string(), value)),
        }
        self
    }
}

impl DatabaseRow for MockDatabaseRow {
    fn get_by_index(&self, index: usize) -> OrmResult<DatabaseValue> {
        self.columns
            .get(index)
            .map(|(_, value)| DatabaseValue::from_json(value.clone()))
            .ok_or_else(|| ModelError::ColumnNotFound(format!("Column at index {} not found", index)))
    }

    fn get_by_name(&self, name: &str) -> OrmResult<DatabaseValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| DatabaseValue::from_json(value.clone()))
            .ok_or_else(|| ModelError::ColumnNotFound(format!("Column '{}' not found", name)))
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }
}

/// A query the mock pool received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<DatabaseValue>,
}

enum Response {
    Rows(Vec<MockDatabaseRow>),
    Fail(ModelError),
}

/// Pool double answering queries by SQL substring.
///
/// Rules are checked in registration order; the first rule whose needle is
/// contained in the SQL answers. Unmatched queries return no rows. Every
/// query is recorded.
#[derive(Clone)]
pub struct MockPool {
    dialect: SqlDialect,
    rules: Arc<Mutex<Vec<(String, Response)>>>,
    queries: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl Default for MockPool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPool {
    pub fn new() -> Self {
        Self {
            dialect: SqlDialect::PostgreSQL,
            rules: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer queries containing `needle` with `rows`
    pub fn respond(self, needle: &str, rows: Vec<MockDatabaseRow>) -> Self {
        self.push_rule(needle, Response::Rows(rows));
        self
    }

    /// Fail queries containing `needle` with `error`
    pub fn fail(self, needle: &str, error: ModelError) -> Self {
        self.push_rule(needle, Response::Fail(error));
        self
    }

    /// Every query received so far
    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries().len()
    }

    fn push_rule(&self, needle: &str, response: Response) {
        self.rules
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((needle.to_string(), response));
    }

    fn answer(&self, sql: &str, params: &[DatabaseValue]) -> OrmResult<Vec<Box<dyn DatabaseRow>>> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedQuery {
                sql: sql.to_string(),
                params: params.to_vec(),
            });

        let rules = self.rules.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match rules.iter().find(|(needle, _)| sql.contains(needle.as_str())) {
            Some((_, Response::Rows(rows))) => Ok(rows
                .iter()
                .cloned()
                .map(|row| Box::new(row) as Box<dyn DatabaseRow>)
                .collect()),
            Some((_, Response::Fail(error))) => Err(error.clone()),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl DatabasePool for MockPool {
    async fn fetch_all(&self, sql: &str, params: &[DatabaseValue]) -> OrmResult<Vec<Box<dyn DatabaseRow>>> {
        self.answer(sql, params)
    }

    fn sql_dialect(&self) -> SqlDialect {
        self.dialect
    }

    async fn close(&self) -> OrmResult<()> {
        Ok(())
    }

    fn stats(&self) -> DatabasePoolStats {
        DatabasePoolStats::default()
    }

    async fn health_check(&self) -> OrmResult<std::time::Duration> {
        Ok(std::time::Duration::ZERO)
    }
}
