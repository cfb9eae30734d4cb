//! Query Builder WHERE clause operations

use crate::backends::DatabaseValue;
use crate::security::ColumnRef;

use super::builder::QueryBuilder;
use super::types::*;

impl QueryBuilder {
    /// Add WHERE column = value
    pub fn where_eq<V: Into<DatabaseValue>>(mut self, column: ColumnRef, value: V) -> Self {
        self.where_conditions.push(WhereCondition {
            column,
            operator: QueryOperator::Equal,
            values: vec![value.into()],
        });
        self
    }

    /// Add WHERE column IN (values)
    pub fn where_in<V, I>(mut self, column: ColumnRef, values: I) -> Self
    where
        V: Into<DatabaseValue>,
        I: IntoIterator<Item = V>,
    {
        self.where_conditions.push(WhereCondition {
            column,
            operator: QueryOperator::In,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }
}
